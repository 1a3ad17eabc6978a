// Lock/unlock scripts gate who may spend an output. Today the engine is
// plain token equality; the `ScriptEngine` seam exists so a real signature
// interpreter can replace it without touching block or transaction shapes.

use serde::{Deserialize, Serialize};

/// Encumbrance on an output. The token is conventionally the recipient's
/// wallet address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockScript {
    script: String,
}

impl LockScript {
    pub fn new(token: &str) -> LockScript {
        TokenEquality::lock(token)
    }

    pub fn token(&self) -> &str {
        &self.script
    }

    /// True iff the candidate token satisfies the encumbrance.
    pub fn unlock(&self, candidate: &str) -> bool {
        TokenEquality::evaluate(self, candidate)
    }
}

/// Token carried by an input, intended to satisfy a `LockScript`. Pure
/// data holder; nothing in the core verifies it against the referenced
/// output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockScript {
    script: Option<String>,
}

impl UnlockScript {
    pub fn new(token: Option<&str>) -> UnlockScript {
        UnlockScript {
            script: token.map(String::from),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// String form used in hash material. An absent token renders as
    /// `None` so the hash input is total.
    pub fn token_string(&self) -> String {
        match &self.script {
            Some(token) => token.clone(),
            None => "None".to_string(),
        }
    }
}

/// Capability seam for script evaluation.
pub trait ScriptEngine {
    fn lock(token: &str) -> LockScript;
    fn evaluate(script: &LockScript, candidate: &str) -> bool;
}

/// Placeholder engine: an output unlocks iff the candidate token equals
/// the locking token exactly.
pub struct TokenEquality;

impl ScriptEngine for TokenEquality {
    fn lock(token: &str) -> LockScript {
        LockScript {
            script: token.to_string(),
        }
    }

    fn evaluate(script: &LockScript, candidate: &str) -> bool {
        script.script == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_script_unlocks_with_matching_token() {
        let script = LockScript::new("1BoatSLRHtKNngkdXEeobR76b53LETtpyT");
        assert!(script.unlock("1BoatSLRHtKNngkdXEeobR76b53LETtpyT"));
    }

    #[test]
    fn test_lock_script_rejects_other_token() {
        let script = LockScript::new("alice");
        assert!(!script.unlock("bob"));
        assert!(!script.unlock(""));
    }

    #[test]
    fn test_unlock_script_token_string() {
        assert_eq!(UnlockScript::new(Some("alice")).token_string(), "alice");
        assert_eq!(UnlockScript::new(None).token_string(), "None");
    }
}
