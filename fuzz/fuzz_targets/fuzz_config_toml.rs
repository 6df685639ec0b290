#![no_main]

use anchorsheet_core::config::SheetConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Neither loading nor validation may panic on arbitrary input.
    if let Ok(config) = SheetConfig::from_toml_str(text) {
        let problems = config.validate();
        assert_eq!(problems.is_empty(), config.validated().is_ok());
    }
});
