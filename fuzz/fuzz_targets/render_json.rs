#![no_main]

use libfuzzer_sys::fuzz_target;

use fixpack::{render_json_with_limits, Buffer, WalkLimits};

fuzz_target!(|data: &[u8]| {
    let mut input_storage = data.to_vec();
    let mut input = Buffer::new(&mut input_storage);
    let mut output_storage = vec![0u8; 1 << 16];
    let mut output = Buffer::new(&mut output_storage);
    let _ = render_json_with_limits(&mut input, &mut output, WalkLimits::with_max_depth(64));
});
