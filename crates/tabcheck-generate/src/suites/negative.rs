use tabcheck_core::{Combination, EXPECTED_EXCEPTION, VALUE_ERROR};

/// Shape/header pairs the renderer must reject.
const REJECTED: [(&str, &str); 3] = [
    ("ListOfDicts", "FirstRow"),
    ("DictOfColumns", "FirstRow"),
    ("ListOfLists", "Keys"),
];

/// Canonical negative cases, each expecting a rejection error.
///
/// All other factors stay at a plain baseline so the shape/header conflict
/// is the only cause.
pub fn negative_cases() -> Vec<Combination> {
    REJECTED
        .iter()
        .map(|&(input_type, headers_mode)| {
            Combination::from_levels([
                input_type,
                headers_mode,
                "plain",
                "never",
                "Default",
                "Strings",
                "Small2x2",
            ])
            .with(EXPECTED_EXCEPTION, VALUE_ERROR)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcheck_core::{Rule, validate};

    #[test]
    fn every_negative_case_is_invalid() {
        let cases = negative_cases();
        assert_eq!(cases.len(), 3);
        for case in &cases {
            let verdict = validate(case);
            assert!(!verdict.valid, "{case}");
            assert!(matches!(
                verdict.rule,
                Some(Rule::DictRejectsFirstRow | Rule::KeysRequiresDict)
            ));
            assert_eq!(case.expected_exception(), Some("ValueError"));
        }
    }
}
