use kiosk_assistant::domain::AudioFormat;

#[test]
fn given_wav_mime_variants_when_parsing_then_all_are_canonical() {
    for mime in ["audio/wav", "audio/x-wav", "AUDIO/WAVE", "audio/vnd.wave; codecs=1"] {
        let format = AudioFormat::from_mime(mime);
        assert_eq!(format, AudioFormat::Wav, "{}", mime);
        assert!(format.is_canonical());
    }
}

#[test]
fn given_browser_recording_mime_when_parsing_then_needs_transcoding() {
    let format = AudioFormat::from_mime("audio/webm;codecs=opus");

    assert_eq!(format, AudioFormat::Webm);
    assert!(!format.is_canonical());
    assert_eq!(format.file_extension(), "webm");
}

#[test]
fn given_unknown_mime_when_parsing_then_other_with_generic_extension() {
    let format = AudioFormat::from_mime("application/octet-stream");

    assert_eq!(format, AudioFormat::Other);
    assert_eq!(format.file_extension(), "bin");
}
