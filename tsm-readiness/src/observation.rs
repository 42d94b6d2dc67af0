use std::fmt;


/// Raw outcome of evaluating one check once.
#[derive(Debug, PartialEq, Clone)]
pub enum Observation {
    Passed(String),
    Failed(String), // transient, poll again
    Fatal(String), // the check can never succeed as specified
}


impl Observation {
    pub fn is_passed(&self) -> bool {
        return matches!(self, Observation::Passed(_));
    }

    pub fn is_fatal(&self) -> bool {
        return matches!(self, Observation::Fatal(_));
    }

    pub fn get_detail(&self) -> &str {
        return match self {
            Observation::Passed(detail) => detail,
            Observation::Failed(detail) => detail,
            Observation::Fatal(detail) => detail,
        };
    }
}


impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Observation::Passed(detail) => write!(f, "passed: {}", detail),
            Observation::Failed(detail) => write!(f, "failed: {}", detail),
            Observation::Fatal(detail) => write!(f, "fatal: {}", detail),
        };
    }
}
