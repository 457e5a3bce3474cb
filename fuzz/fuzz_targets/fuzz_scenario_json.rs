#![no_main]

use dragdrop_harness::{Scenario, ScenarioError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(scenario) = Scenario::from_json(text) else {
        return;
    };
    if scenario.elements.len() > 32 || scenario.steps.len() > 1024 {
        return;
    }
    // Any scenario either replays or reports a typed error; it never panics.
    match scenario.run() {
        Ok(outcome) => {
            assert!(outcome.harness.host().stale_detaches() == 0);
        }
        Err(
            ScenarioError::Drag(_)
            | ScenarioError::UnknownTarget { .. }
            | ScenarioError::MissingElement { .. }
            | ScenarioError::Mismatch { .. },
        ) => {}
        Err(ScenarioError::Json(err)) => panic!("parsed scenario failed as JSON: {err}"),
    }
});
