/// Joins the texts of multiple candidates.
pub const CANDIDATE_SEPARATOR: &str = "\n---\n";

/// Ordered set of distinct finish-reason tokens.
///
/// The first candidate's reason leads; later candidates contribute only
/// reasons not already present. Empty tokens are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishReasons {
    tokens: Vec<String>,
}

impl FinishReasons {
    pub fn push(&mut self, reason: &str) {
        let reason = reason.trim();
        if reason.is_empty() || self.tokens.iter().any(|t| t == reason) {
            return;
        }
        self.tokens.push(reason.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Comma-joined reasons, or `fallback` when none were reported.
    pub fn summarize(&self, fallback: &str) -> String {
        if self.tokens.is_empty() {
            fallback.to_string()
        } else {
            self.tokens.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_tokens_in_order() {
        let mut reasons = FinishReasons::default();
        for r in ["stop", "length", "stop", ""] {
            reasons.push(r);
        }
        assert_eq!(reasons.summarize("N/A"), "stop, length");
    }

    #[test]
    fn test_substring_tokens_are_distinct() {
        let mut reasons = FinishReasons::default();
        reasons.push("nonstop");
        reasons.push("stop");
        assert_eq!(reasons.summarize("N/A"), "nonstop, stop");
    }

    #[test]
    fn test_fallback_when_empty() {
        let reasons = FinishReasons::default();
        assert!(reasons.is_empty());
        assert_eq!(reasons.summarize("None"), "None");
    }
}
