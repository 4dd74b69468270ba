//! A service for greeting someone.

use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// A salutation addressed to someone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    /// The configured salutation, e.g. "Hello".
    greeting: String,
    /// Who is being greeted.
    name: String,
}

impl Greeting {
    /// Constructs a new greeting.
    pub fn new(greeting: String, name: String) -> Self {
        Self { greeting, name }
    }

    /// Returns the salutation.
    pub fn greeting(&self) -> &str {
        self.greeting.as_ref()
    }

    /// Returns the name of the one being greeted.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }
}

/// Greets someone by name with the given salutation.
#[instrument(ret)]
pub fn greet(greeting: &str, name: &str) -> Greeting {
    Greeting::new(greeting.to_string(), name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{greet, Greeting};

    #[test]
    fn greet_keeps_both_inputs() {
        let greeting = greet("Hello", "World");
        assert_eq!("Hello", greeting.greeting());
        assert_eq!("World", greeting.name());
    }

    #[test]
    fn name_is_not_normalized() {
        let greeting = greet("Hi", "  mIxEd Case ");
        assert_eq!("  mIxEd Case ", greeting.name());
    }

    #[test]
    fn serializes_greeting_before_name() {
        let json = serde_json::to_string(&greet("Bonjour", "Ada")).unwrap();
        assert_eq!(r#"{"greeting":"Bonjour","name":"Ada"}"#, json);
    }

    #[test]
    fn deserializes_from_wire_format() {
        let greeting: Greeting =
            serde_json::from_str(r#"{"greeting":"Hello","name":"World"}"#).unwrap();
        assert_eq!(Greeting::new("Hello".into(), "World".into()), greeting);
    }
}
