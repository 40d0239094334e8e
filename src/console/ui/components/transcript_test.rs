#[cfg(test)]
mod tests {
    use super::super::transcript::Transcript;
    use crate::console::domain::models::TranscriptEntry;

    #[test]
    fn test_entries_keep_submission_order() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::Statement("play".to_string()));
        transcript.push(TranscriptEntry::Result("ok".to_string()));
        transcript.push(TranscriptEntry::Statement("frobnicate".to_string()));
        transcript.push(TranscriptEntry::Error("bad syntax".to_string()));

        assert_eq!(
            transcript.entries(),
            &[
                TranscriptEntry::Statement("play".to_string()),
                TranscriptEntry::Result("ok".to_string()),
                TranscriptEntry::Statement("frobnicate".to_string()),
                TranscriptEntry::Error("bad syntax".to_string()),
            ]
        );
    }

    #[test]
    fn test_starts_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
    }
}
