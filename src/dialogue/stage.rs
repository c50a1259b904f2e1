//! Collection stages of the dialogue.

use super::prompts;

/// Current position in the state machine.
///
/// START is implicit (a session that has not yet greeted); END is session
/// teardown. Everything in between collects one field, except [`Stage::Repeat`]
/// which decides between a fresh run and a farewell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Name,
    Year,
    Month,
    Day,
    Time,
    Location,
    CountryCode,
    Repeat,
}

impl Stage {
    /// Prompt sent when a transition *into* this stage succeeds.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Name => prompts::GREETING,
            Self::Year => prompts::ASK_YEAR,
            Self::Month => prompts::ASK_MONTH,
            Self::Day => prompts::ASK_DAY,
            Self::Time => prompts::ASK_TIME,
            Self::Location => prompts::ASK_LOCATION,
            Self::CountryCode => prompts::ASK_COUNTRY,
            Self::Repeat => prompts::REPEAT_OFFER,
        }
    }

    /// Re-prompt sent when this stage's validator rejects the input.
    pub fn rebuke(self) -> &'static str {
        match self {
            Self::Name => prompts::BAD_NAME,
            Self::Year => prompts::BAD_YEAR,
            Self::Month => prompts::BAD_MONTH,
            Self::Day => prompts::BAD_DAY,
            Self::Time => prompts::BAD_TIME,
            Self::Location => prompts::LOCATION_TOO_LONG,
            Self::CountryCode => prompts::BAD_COUNTRY,
            Self::Repeat => prompts::FAREWELL,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Time => "time",
            Self::Location => "location",
            Self::CountryCode => "country_code",
            Self::Repeat => "repeat",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Stage; 8] = [
        Stage::Name,
        Stage::Year,
        Stage::Month,
        Stage::Day,
        Stage::Time,
        Stage::Location,
        Stage::CountryCode,
        Stage::Repeat,
    ];

    #[test]
    fn every_stage_has_distinct_prompt_and_rebuke() {
        for stage in ALL {
            assert!(!stage.prompt().is_empty());
            assert!(!stage.rebuke().is_empty());
        }
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(Stage::CountryCode.to_string(), "country_code");
        assert_eq!(Stage::Name.to_string(), "name");
    }
}
