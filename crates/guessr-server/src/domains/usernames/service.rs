use std::sync::Arc;

use guessr_core::{
    check_anonymous, parse_flag, setting_keys, BannedWordMatcher, BannedWordSource, RejectReason,
    SettingsSource, UsernameVerdict,
};

use crate::infra::metrics;

#[derive(Clone)]
pub struct UsernameValidator {
    words: Arc<dyn BannedWordSource>,
    settings: Arc<dyn SettingsSource>,
}

impl UsernameValidator {
    pub fn new(words: Arc<dyn BannedWordSource>, settings: Arc<dyn SettingsSource>) -> Self {
        Self { words, settings }
    }

    async fn validation_disabled(&self) -> bool {
        let key = setting_keys::DISABLE_USERNAME_VALIDATION;
        match self.settings.get_setting(key, "0").await {
            Ok(value) => parse_flag(&value).unwrap_or_else(|| {
                tracing::warn!(event = "setting_invalid", key, value = %value);
                false
            }),
            Err(err) => {
                metrics::store_failure("get_setting");
                tracing::warn!(event = "setting_read_failed", key, error = %err);
                false
            }
        }
    }

    /// A failed word-list fetch counts as an empty list.
    async fn banned_words(&self) -> Vec<String> {
        match self.words.list_banned_words().await {
            Ok(words) => words,
            Err(err) => {
                metrics::store_failure("list_banned_words");
                tracing::warn!(
                    event = "banned_words_fetch_failed",
                    error = %err,
                    "Skipping banned-word check"
                );
                Vec::new()
            }
        }
    }

    pub async fn evaluate(&self, username: &str) -> UsernameVerdict {
        if self.validation_disabled().await {
            metrics::username_checked(&UsernameVerdict::Accepted, true);
            return UsernameVerdict::Accepted;
        }

        let verdict = if let Some(reason) = check_anonymous(username) {
            UsernameVerdict::Rejected(reason)
        } else {
            let words = self.banned_words().await;
            let matcher = BannedWordMatcher::new(&words);
            for word in matcher.skipped() {
                metrics::store_failure("compile_banned_word");
                tracing::warn!(
                    event = "banned_word_skipped",
                    word = %word,
                    "Banned word pattern failed to compile"
                );
            }
            match matcher.find(username) {
                Some(word) => UsernameVerdict::Rejected(RejectReason::BannedWord(word.to_string())),
                None => UsernameVerdict::Accepted,
            }
        };

        if let UsernameVerdict::Rejected(reason) = &verdict {
            tracing::debug!(event = "username_rejected", rule = reason.rule());
        }
        metrics::username_checked(&verdict, false);
        verdict
    }

    pub async fn is_offensive_username(&self, username: &str) -> bool {
        self.evaluate(username).await.is_rejected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use guessr_core::{StoreError, StoreResult};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryStore {
        words: Vec<String>,
        settings: HashMap<String, String>,
        fail_words: bool,
        fail_settings: bool,
        word_fetches: AtomicUsize,
    }

    impl MemoryStore {
        fn with_words(words: &[&str]) -> Self {
            Self {
                words: words.iter().map(|word| word.to_string()).collect(),
                ..Self::default()
            }
        }

        fn setting(mut self, key: &str, value: &str) -> Self {
            self.settings.insert(key.to_string(), value.to_string());
            self
        }
    }

    #[async_trait]
    impl BannedWordSource for MemoryStore {
        async fn list_banned_words(&self) -> StoreResult<Vec<String>> {
            self.word_fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_words {
                return Err(StoreError::Query("no such table: banned_words".to_string()));
            }
            Ok(self.words.clone())
        }
    }

    #[async_trait]
    impl SettingsSource for MemoryStore {
        async fn get_setting(&self, key: &str, default: &str) -> StoreResult<String> {
            if self.fail_settings {
                return Err(StoreError::Unavailable("pool closed".to_string()));
            }
            Ok(self
                .settings
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string()))
        }
    }

    fn validator(store: MemoryStore) -> (UsernameValidator, Arc<MemoryStore>) {
        let store = Arc::new(store);
        (UsernameValidator::new(store.clone(), store.clone()), store)
    }

    #[tokio::test]
    async fn anonymous_variants_are_rejected() {
        let (validator, _) = validator(MemoryStore::default());
        assert!(validator.is_offensive_username("Anonymous").await);
        assert!(validator.is_offensive_username("annonymous").await);
        assert!(validator.is_offensive_username("anonimous").await);
        assert!(validator.is_offensive_username("annoonymous").await);
        assert!(!validator.is_offensive_username("anonymously_yours").await);
        assert!(!validator.is_offensive_username("").await);
    }

    #[tokio::test]
    async fn anonymous_check_short_circuits_word_fetch() {
        let (validator, store) = validator(MemoryStore::with_words(&["troll"]));
        assert_eq!(
            validator.evaluate("ANONYMOUS").await,
            UsernameVerdict::Rejected(RejectReason::AnonymousPattern)
        );
        assert_eq!(store.word_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn banned_word_needs_whole_token() {
        let (validator, _) = validator(MemoryStore::with_words(&["ass", "troll"]));
        assert!(!validator.is_offensive_username("classic").await);
        assert!(!validator.is_offensive_username("Trolley").await);
        assert_eq!(
            validator.evaluate("big ASS").await,
            UsernameVerdict::Rejected(RejectReason::BannedWord("ass".to_string()))
        );
        assert!(validator.is_offensive_username("the_troll troll").await);
    }

    #[tokio::test]
    async fn symbol_edged_banned_word_matches_standalone() {
        let (validator, _) = validator(MemoryStore::with_words(&["@ss"]));
        assert_eq!(
            validator.evaluate("my @ss").await,
            UsernameVerdict::Rejected(RejectReason::BannedWord("@ss".to_string()))
        );
        assert!(!validator.is_offensive_username("cl@ssic").await);
    }

    #[tokio::test]
    async fn trailing_newline_does_not_hide_anonymous() {
        let (validator, _) = validator(MemoryStore::default());
        assert!(validator.is_offensive_username("anonymous\n").await);
        assert!(validator.is_offensive_username(" Annonymous ").await);
    }

    #[tokio::test]
    async fn banned_word_inside_anonymous_lookalike() {
        let (validator, _) = validator(MemoryStore::with_words(&["yours"]));
        assert!(validator.is_offensive_username("anonymously yours").await);
    }

    #[tokio::test]
    async fn disable_flag_accepts_everything() {
        let store = MemoryStore::with_words(&["troll"])
            .setting(setting_keys::DISABLE_USERNAME_VALIDATION, "1");
        let (validator, store) = validator(store);
        for name in ["Anonymous", "annonymous", "troll", "classic"] {
            assert!(!validator.is_offensive_username(name).await, "{name}");
        }
        assert_eq!(store.word_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disable_flag_zero_keeps_validation() {
        let store = MemoryStore::default().setting(setting_keys::DISABLE_USERNAME_VALIDATION, "0");
        let (validator, _) = validator(store);
        assert!(validator.is_offensive_username("Anonymous").await);
    }

    #[tokio::test]
    async fn unreadable_or_garbage_flag_keeps_validation() {
        let store = MemoryStore {
            fail_settings: true,
            ..MemoryStore::default()
        };
        let (validator, _) = validator(store);
        assert!(validator.is_offensive_username("Anonymous").await);

        let store =
            MemoryStore::default().setting(setting_keys::DISABLE_USERNAME_VALIDATION, "perhaps");
        let (validator, _) = self::validator(store);
        assert!(validator.is_offensive_username("anonymous").await);
    }

    #[tokio::test]
    async fn word_fetch_failure_accepts_after_anonymous_checks() {
        let store = MemoryStore {
            words: vec!["troll".to_string()],
            fail_words: true,
            ..MemoryStore::default()
        };
        let (validator, _) = validator(store);
        let before = metrics::store_failure_count("list_banned_words");
        assert!(!validator.is_offensive_username("troll").await);
        assert!(metrics::store_failure_count("list_banned_words") > before);
        assert!(validator.is_offensive_username("Anonymous").await);
    }
}
