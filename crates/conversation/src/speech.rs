//! Speech coordination for a conversation session
//!
//! Enforces mutual exclusion between speech output and voice capture:
//! speaking stops any active capture first, and starting capture stops
//! any in-progress speech first. Without this the synthesizer's own
//! output gets transcribed back as user input.

use std::sync::atomic::{AtomicBool, Ordering};

use saarthi_core::{Language, Result, SpeechCapability};

/// Drives the session's speech side effects through a
/// [`SpeechCapability`].
///
/// When the capability is `Unavailable` every operation is a silent
/// no-op, apart from a single warning logged on first use; the session
/// remains fully usable through text input.
pub struct SpeechCoordinator {
    capability: SpeechCapability,
    unsupported_notice_given: AtomicBool,
}

impl SpeechCoordinator {
    pub fn new(capability: SpeechCapability) -> Self {
        Self {
            capability,
            unsupported_notice_given: AtomicBool::new(false),
        }
    }

    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    fn note_unsupported(&self) {
        if !self.unsupported_notice_given.swap(true, Ordering::Relaxed) {
            tracing::warn!("Speech is not supported in this runtime; continuing text-only");
        }
    }

    /// Speak a prompt, stopping any active capture and any in-progress
    /// speech first.
    pub async fn speak(&self, text: &str, language: Language) -> Result<()> {
        match &self.capability {
            SpeechCapability::Available {
                synthesizer,
                recognizer,
            } => {
                if recognizer.is_listening() {
                    recognizer.stop_capture().await?;
                }
                if synthesizer.is_speaking() {
                    synthesizer.stop().await?;
                }
                synthesizer.speak(text, language).await
            }
            SpeechCapability::Unavailable => {
                self.note_unsupported();
                Ok(())
            }
        }
    }

    /// Begin voice capture, stopping any in-progress speech first.
    pub async fn start_listening(&self, language: Language) -> Result<()> {
        match &self.capability {
            SpeechCapability::Available {
                synthesizer,
                recognizer,
            } => {
                if synthesizer.is_speaking() {
                    synthesizer.stop().await?;
                }
                recognizer.set_language(language);
                recognizer.start_capture(language).await
            }
            SpeechCapability::Unavailable => {
                self.note_unsupported();
                Ok(())
            }
        }
    }

    /// Stop voice capture without starting anything else.
    pub async fn stop_listening(&self) -> Result<()> {
        match &self.capability {
            SpeechCapability::Available { recognizer, .. } => {
                if recognizer.is_listening() {
                    recognizer.stop_capture().await?;
                }
                Ok(())
            }
            SpeechCapability::Unavailable => Ok(()),
        }
    }

    /// Cancel all speech activity. Used on restart and session teardown.
    pub async fn stop_all(&self) -> Result<()> {
        match &self.capability {
            SpeechCapability::Available {
                synthesizer,
                recognizer,
            } => {
                if recognizer.is_listening() {
                    recognizer.stop_capture().await?;
                }
                if synthesizer.is_speaking() {
                    synthesizer.stop().await?;
                }
                Ok(())
            }
            SpeechCapability::Unavailable => Ok(()),
        }
    }
}

impl std::fmt::Debug for SpeechCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechCoordinator")
            .field("capability", &self.capability)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use saarthi_core::{SpeechRecognizer, SpeechSynthesizer};

    #[derive(Default)]
    struct MockSynth {
        speaking: AtomicBool,
        spoken: Mutex<Vec<String>>,
        stops: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for MockSynth {
        async fn speak(&self, text: &str, _language: Language) -> Result<()> {
            self.speaking.store(true, Ordering::SeqCst);
            self.spoken.lock().push(text.to_string());
            Ok(())
        }

        async fn stop(&self) -> Result<()> {
            self.speaking.store(false, Ordering::SeqCst);
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn is_speaking(&self) -> bool {
            self.speaking.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct MockRecognizer {
        listening: AtomicBool,
        stops: AtomicUsize,
        language: Mutex<Option<Language>>,
    }

    #[async_trait]
    impl SpeechRecognizer for MockRecognizer {
        async fn start_capture(&self, language: Language) -> Result<()> {
            self.listening.store(true, Ordering::SeqCst);
            *self.language.lock() = Some(language);
            Ok(())
        }

        async fn stop_capture(&self) -> Result<()> {
            self.listening.store(false, Ordering::SeqCst);
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn set_language(&self, language: Language) {
            *self.language.lock() = Some(language);
        }

        fn is_listening(&self) -> bool {
            self.listening.load(Ordering::SeqCst)
        }
    }

    fn available() -> (Arc<MockSynth>, Arc<MockRecognizer>, SpeechCoordinator) {
        let synth = Arc::new(MockSynth::default());
        let recognizer = Arc::new(MockRecognizer::default());
        let coordinator = SpeechCoordinator::new(SpeechCapability::Available {
            synthesizer: synth.clone(),
            recognizer: recognizer.clone(),
        });
        (synth, recognizer, coordinator)
    }

    #[tokio::test]
    async fn test_speak_stops_capture_first() {
        let (synth, recognizer, coordinator) = available();
        coordinator.start_listening(Language::English).await.unwrap();
        assert!(recognizer.is_listening());

        coordinator.speak("hello", Language::English).await.unwrap();
        assert!(!recognizer.is_listening());
        assert_eq!(recognizer.stops.load(Ordering::SeqCst), 1);
        assert_eq!(synth.spoken.lock().as_slice(), ["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_listening_stops_speech_first() {
        let (synth, recognizer, coordinator) = available();
        coordinator.speak("prompt", Language::English).await.unwrap();
        assert!(synth.is_speaking());

        coordinator.start_listening(Language::Hindi).await.unwrap();
        assert!(!synth.is_speaking());
        assert!(recognizer.is_listening());
        assert_eq!(*recognizer.language.lock(), Some(Language::Hindi));
    }

    #[tokio::test]
    async fn test_speak_interrupts_previous_speech() {
        let (synth, _recognizer, coordinator) = available();
        coordinator.speak("first", Language::English).await.unwrap();
        coordinator.speak("second", Language::English).await.unwrap();
        assert_eq!(synth.stops.load(Ordering::SeqCst), 1);
        assert_eq!(
            synth.spoken.lock().as_slice(),
            ["first".to_string(), "second".to_string()]
        );
    }

    #[tokio::test]
    async fn test_stop_all_silences_everything() {
        let (synth, recognizer, coordinator) = available();
        coordinator.speak("prompt", Language::English).await.unwrap();
        coordinator.stop_all().await.unwrap();
        assert!(!synth.is_speaking());
        assert!(!recognizer.is_listening());
    }

    #[tokio::test]
    async fn test_unavailable_is_noop() {
        let coordinator = SpeechCoordinator::new(SpeechCapability::Unavailable);
        assert!(!coordinator.is_available());
        coordinator.speak("text", Language::English).await.unwrap();
        coordinator.start_listening(Language::English).await.unwrap();
        coordinator.stop_all().await.unwrap();
    }
}
