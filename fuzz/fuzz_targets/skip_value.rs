#![no_main]

use libfuzzer_sys::fuzz_target;

use fixpack::{skip_with_limits, Buffer, WalkLimits};

fuzz_target!(|data: &[u8]| {
    let mut storage = data.to_vec();
    let len = storage.len();
    let mut buf = Buffer::new(&mut storage);
    // Errors are expected on arbitrary input; the walker must stay in
    // bounds and terminate either way.
    if skip_with_limits(&mut buf, WalkLimits::with_max_depth(64)).is_ok() {
        assert!(buf.position() <= len);
    }
});
