#[cfg(fuzzing)]
use honggfuzz::fuzz;
use runml::{normalizer::normalize, translate, types::TranslateOptions};

#[cfg(fuzzing)]
fn main() {
    let opts = TranslateOptions::legacy();
    loop {
        fuzz!(|data: &[u8]| { test_once(data, &opts) });
    }
}

/// Translation must never panic, and must always close every brace it opens.
/// Braces in the input pass through verbatim, so balance is only checked when
/// the input has none.
fn test_once(data: &[u8], opts: &TranslateOptions) {
    if let Ok(data) = std::str::from_utf8(data) {
        let verbatim_braces = data.contains(|c: char| c == '{' || c == '}');
        if let Ok(src) = translate(data, opts) {
            assert!(verbatim_braces || src.0.matches('{').count() == src.0.matches('}').count(),
                "unbalanced output for {:?}", data);
        }
        let _ = normalize(data);
    }
}

#[cfg(not(fuzzing))]
fn main() {
    // Smoke run over the bundled demos when built without the fuzzer
    let opts = TranslateOptions::default();
    test_once(include_bytes!("../../demos/square.ml"), &opts);
    test_once(include_bytes!("../../demos/functions.ml"), &opts);
}
