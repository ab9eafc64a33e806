//! Password strength evaluator - main scoring pipeline.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::blocklist::{default_blocklist, Blocklist};
use crate::sections::{calculate_entropy, penalty_multiplier};
use crate::strength::PasswordStrengthResult;

/// Entropy, in bits, that maps to a full score of 100.
const FULL_SCORE_BITS: f64 = 80.0;

/// Debounce applied by [`evaluate_password_strength_tx`] before scoring.
#[cfg(feature = "async")]
pub const EVALUATION_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Raw 0-100 score: penalized entropy scaled against 80 bits.
///
/// Does not consult the blocklist.
pub fn compute_score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let adjusted = calculate_entropy(password) * penalty_multiplier(password);
    let score = (adjusted / FULL_SCORE_BITS * 100.0).round();
    score.clamp(0.0, 100.0) as u8
}

/// Scores passwords against a blocklist.
#[derive(Debug, Clone)]
pub struct PasswordScorer {
    blocklist: Blocklist,
}

impl Default for PasswordScorer {
    fn default() -> Self {
        Self::new(default_blocklist().clone())
    }
}

impl PasswordScorer {
    pub fn new(blocklist: Blocklist) -> Self {
        Self { blocklist }
    }

    /// Blocklist used by this scorer.
    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    /// Evaluates `password`; `breached` comes from an external breach lookup.
    pub fn evaluate(&self, password: &SecretString, breached: bool) -> PasswordStrengthResult {
        score_with(&self.blocklist, password, breached)
    }
}

/// Evaluates password strength against the built-in blocklist.
///
/// # Arguments
/// * `password` - The password to evaluate
/// * `breached` - Whether the host's breach lookup reported this password
pub fn evaluate_password_strength(password: &SecretString, breached: bool) -> PasswordStrengthResult {
    score_with(default_blocklist(), password, breached)
}

fn score_with(blocklist: &Blocklist, password: &SecretString, breached: bool) -> PasswordStrengthResult {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return PasswordStrengthResult::empty();
    }

    let is_blocked = blocklist.contains(pwd);
    PasswordStrengthResult::from_parts(compute_score(pwd), is_blocked, breached)
}

/// Debounced evaluation that sends the result via channel.
///
/// Nothing is sent if `token` is cancelled before the debounce elapses, so a
/// newer keystroke simply supersedes this one.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    scorer: &PasswordScorer,
    password: &SecretString,
    breached: bool,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordStrengthResult>,
) {
    #[cfg(feature = "tracing")]
    tracing::debug!("evaluation is about to start...");

    tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("evaluation superseded before debounce elapsed");
            return;
        }
        _ = tokio::time::sleep(EVALUATION_DEBOUNCE) => {}
    }

    let evaluation = scorer.evaluate(password, breached);

    if token.is_cancelled() {
        return;
    }

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluate_password_strength_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let scorer = PasswordScorer::default();

        evaluate_password_strength_tx(&scorer, &secret("TestPass123!"), false, CancellationToken::new(), tx)
            .await;

        let evaluation = rx.recv().await.expect("Should receive evaluation");
        assert!(evaluation.score > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_evaluation_sends_nothing() {
        let (tx, mut rx) = mpsc::channel(1);
        let scorer = PasswordScorer::default();
        let token = CancellationToken::new();
        token.cancel();

        evaluate_password_strength_tx(&scorer, &secret("TestPass123!"), false, token, tx).await;

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_keystroke_wins() {
        let (tx, mut rx) = mpsc::channel(2);
        let scorer = PasswordScorer::default();

        let stale = CancellationToken::new();
        let stale_task = {
            let scorer = scorer.clone();
            let tx = tx.clone();
            let stale = stale.clone();
            tokio::spawn(async move {
                evaluate_password_strength_tx(&scorer, &secret("pass"), false, stale, tx).await;
            })
        };
        stale.cancel();
        evaluate_password_strength_tx(&scorer, &secret("xK9#mP2!qR4z&wT7"), false, CancellationToken::new(), tx)
            .await;
        stale_task.await.unwrap();

        let evaluation = rx.recv().await.expect("latest evaluation");
        assert!(evaluation.score >= 80);
        assert!(rx.recv().await.is_none());
    }
}
