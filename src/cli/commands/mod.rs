//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod get;
pub mod list;

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use tempfile::TempDir;
    use zeroize::Zeroizing;

    use crate::cli::prompt::SecretPrompt;
    use crate::cli::Context;
    use crate::config::Settings;
    use crate::crypto::{FernetScheme, Pbkdf2Params};
    use crate::errors::{Result, VaultError};

    /// Answers prompts from a fixed script.
    pub struct ScriptedPrompt {
        answers: RefCell<VecDeque<String>>,
        confirm: bool,
        pub asked: Cell<usize>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
                confirm: false,
                asked: Cell::new(0),
            }
        }

        pub fn confirming(mut self, confirm: bool) -> Self {
            self.confirm = confirm;
            self
        }
    }

    impl SecretPrompt for ScriptedPrompt {
        fn read_secret(&self, _prompt: &str) -> Result<Zeroizing<String>> {
            self.asked.set(self.asked.get() + 1);
            self.answers
                .borrow_mut()
                .pop_front()
                .map(Zeroizing::new)
                .ok_or(VaultError::UserCancelled)
        }

        fn confirm(&self, _prompt: &str) -> Result<bool> {
            Ok(self.confirm)
        }
    }

    /// A context rooted in a fresh temp dir, with a cheap KDF.
    pub fn context(obfuscate: bool) -> (TempDir, Context) {
        let tmp = TempDir::new().expect("create temp dir");
        let settings = Settings {
            vault_dir: tmp.path().join("vt").to_string_lossy().into_owned(),
            obfuscate,
            ..Settings::default()
        };
        let ctx = Context {
            settings,
            safe: "safe".to_string(),
            scheme: FernetScheme::new().with_params(Pbkdf2Params { iterations: 1_000 }),
        };
        (tmp, ctx)
    }
}
