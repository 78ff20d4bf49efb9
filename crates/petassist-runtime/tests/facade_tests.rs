//! Facade behavior against fake providers.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{HarnessBuilder, recording_sink};
use petassist_core::{
    Animal, AssistFailure, AvailabilityState, CapabilityKey, ImageInput, LanguageTag,
};
use petassist_runtime::ImproveRequest;

fn tag(s: &str) -> LanguageTag {
    LanguageTag::parse(s).unwrap()
}

fn photo() -> ImageInput {
    ImageInput::from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap()
}

// =============================================================================
// Session reuse
// =============================================================================

#[tokio::test]
async fn test_same_language_pair_provisions_once() {
    let h = HarnessBuilder::new().build();
    let translator = h.core.translator();

    let first = translator.translate("Good dog", &tag("en"), &tag("es"), None).await.unwrap();
    let second = translator.translate("Calm cat", &tag("en"), &tag("es"), None).await.unwrap();

    assert_eq!(first, "[es] Good dog");
    assert_eq!(second, "[es] Calm cat");
    assert_eq!(h.translator.create_count(), 1);
    // The cached session makes a second probe unnecessary.
    assert_eq!(h.translator.availability_count(), 1);
}

#[tokio::test]
async fn test_distinct_language_pairs_get_distinct_sessions() {
    let h = HarnessBuilder::new().build();
    let translator = h.core.translator();

    translator.translate("Hi", &tag("en"), &tag("es"), None).await.unwrap();
    let fr = translator.translate("Hi", &tag("en"), &tag("fr"), None).await.unwrap();

    assert_eq!(fr, "[fr] Hi");
    assert_eq!(h.translator.create_count(), 2);
}

#[tokio::test]
async fn test_concurrent_first_calls_share_provisioning() {
    let h = HarnessBuilder::new()
        .map_writer(|w| w.with_create_delay(Duration::from_millis(50)))
        .build();
    let writer = h.core.writer();

    let (a, b) = tokio::join!(
        writer.improve(ImproveRequest::new("sweet dog"), None),
        writer.improve(ImproveRequest::new("shy cat"), None),
    );

    assert_eq!(a.unwrap(), "Meet Biscuit, a gentle soul.");
    assert_eq!(b.unwrap(), "Meet Biscuit, a gentle soul.");
    assert_eq!(h.writer.create_count(), 1);
    assert_eq!(h.writer_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_calls_on_one_session_never_overlap() {
    let h = HarnessBuilder::new()
        .translator_with(Duration::from_millis(20), false, |t| t)
        .build();
    let translator = h.core.translator();
    let (en, es) = (tag("en"), tag("es"));

    let (a, b, c) = tokio::join!(
        translator.translate("one", &en, &es, None),
        translator.translate("two", &en, &es, None),
        translator.translate("three", &en, &es, None),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(h.overlap.max_in_flight.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Short circuits
// =============================================================================

#[tokio::test]
async fn test_identity_translation_never_provisions() {
    let h = HarnessBuilder::new().build();

    let out = h
        .core
        .translator()
        .translate("Good dog", &tag("en"), &tag("EN"), None)
        .await
        .unwrap();

    assert_eq!(out, "Good dog");
    assert_eq!(h.translator.availability_count(), 0);
    assert_eq!(h.translator.create_count(), 0);
}

#[tokio::test]
async fn test_blank_input_makes_no_capability_calls() {
    let h = HarnessBuilder::new().build();

    let improved = h.core.writer().improve(ImproveRequest::new("  \n"), None).await.unwrap();
    let corrected = h.core.proofreader().correct("", None).await.unwrap();

    assert_eq!(improved, "  \n");
    assert_eq!(corrected, "");
    assert_eq!(h.writer.availability_count(), 0);
    assert_eq!(h.writer.create_count(), 0);
    assert_eq!(h.proofreader.availability_count(), 0);
    assert_eq!(h.proofreader.create_count(), 0);
    assert_eq!(h.writer_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.proofreader_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unavailable_short_circuits_without_provisioning() {
    let h = HarnessBuilder::new()
        .map_proofreader(|p| p.with_token("unavailable"))
        .build();

    let err = h.core.proofreader().correct("teh dog", None).await.unwrap_err();

    assert!(matches!(err, AssistFailure::CapabilityUnavailable { .. }));
    assert!(!err.is_retryable());
    assert_eq!(h.proofreader.create_count(), 0);
    assert!(!h.core.is_offered(&CapabilityKey::Proofreader));
}

#[tokio::test]
async fn test_absent_entry_point_is_unavailable() {
    let h = HarnessBuilder::new()
        .map_classifier(common::FakeProvider::absent)
        .build();

    assert!(!h.core.is_offered(&CapabilityKey::ImageClassifier));
    let err = h.core.classifier().analyze(photo(), None).await.unwrap_err();

    assert!(matches!(err, AssistFailure::CapabilityUnavailable { .. }));
    assert_eq!(h.classifier.availability_count(), 0);
    assert_eq!(h.classifier.create_count(), 0);
}

// =============================================================================
// Progress
// =============================================================================

#[tokio::test]
async fn test_download_progress_is_monotonic_and_completes_once() {
    let h = HarnessBuilder::new()
        .map_writer(|w| w.with_download(&[0.0, 0.3, 0.2, 0.7]))
        .build();
    let (seen, sink) = recording_sink();

    h.core
        .writer()
        .improve(ImproveRequest::new("sweet dog"), Some(sink.clone()))
        .await
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![0.0, 30.0, 70.0, 100.0]);

    // Cache hit: no further progress.
    h.core
        .writer()
        .improve(ImproveRequest::new("shy cat"), Some(sink))
        .await
        .unwrap();
    assert_eq!(seen.lock().unwrap().len(), 4);
    assert_eq!(
        h.core.snapshot(),
        vec![(CapabilityKey::Writer, AvailabilityState::Available)]
    );
}

#[tokio::test]
async fn test_no_progress_when_already_available() {
    let h = HarnessBuilder::new()
        .map_writer(|w| w.with_download(&[0.5]).with_token("available"))
        .build();
    let (seen, sink) = recording_sink();

    h.core
        .writer()
        .improve(ImproveRequest::new("sweet dog"), Some(sink))
        .await
        .unwrap();

    assert!(seen.lock().unwrap().is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_failed_provisioning_is_retryable_and_evicted() {
    let h = HarnessBuilder::new()
        .map_proofreader(|p| p.with_download(&[0.4]).failing_creates(1))
        .build();
    let (seen, sink) = recording_sink();

    let err = h
        .core
        .proofreader()
        .correct("good boy", Some(sink.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AssistFailure::ProvisioningFailed { .. }));
    assert!(err.is_retryable());
    assert_eq!(*seen.lock().unwrap(), vec![40.0]);
    assert!(!h.core.is_offered(&CapabilityKey::Proofreader));

    let corrected = h.core.proofreader().correct("good boy", Some(sink)).await.unwrap();
    assert_eq!(corrected, "Good boy.");
    assert_eq!(h.proofreader.create_count(), 2);
    assert_eq!(h.proofreader.availability_count(), 2);
    assert!(h.core.is_offered(&CapabilityKey::Proofreader));
}

#[tokio::test]
async fn test_waiter_recovering_from_failed_provisioning_is_offered() {
    let h = HarnessBuilder::new()
        .map_proofreader(|p| {
            p.with_download(&[0.5])
                .failing_creates(1)
                .with_create_delay(Duration::from_millis(50))
        })
        .build();
    let proofreader = h.core.proofreader();

    let (first, second) = tokio::join!(
        proofreader.correct("good girl", None),
        proofreader.correct("good girl", None),
    );
    let mut outcomes = [first, second];
    outcomes.sort_by_key(Result::is_ok);
    assert!(matches!(
        outcomes[0],
        Err(AssistFailure::ProvisioningFailed { .. })
    ));
    assert_eq!(outcomes[1].as_deref(), Ok("Good girl."));
    assert_eq!(h.proofreader.create_count(), 2);

    assert_eq!(
        h.core.snapshot(),
        vec![(CapabilityKey::Proofreader, AvailabilityState::Available)]
    );
    assert!(h.core.is_offered(&CapabilityKey::Proofreader));

    assert_eq!(proofreader.correct("third", None).await.unwrap(), "Third.");
    assert_eq!(h.proofreader.create_count(), 2);
    assert!(h.core.is_offered(&CapabilityKey::Proofreader));
}

#[tokio::test(start_paused = true)]
async fn test_stale_availability_answer_does_not_override_provisioned_session() {
    let h = HarnessBuilder::new()
        .map_writer(|w| {
            w.with_download(&[0.5])
                .with_availability_delay(Duration::from_millis(50))
        })
        .build();
    let key = CapabilityKey::Writer;

    // The refresh asks the runtime before provisioning finishes and hears
    // back after it, still with the pre-download token.
    let (improved, refreshed) = tokio::join!(
        h.core.writer().improve(ImproveRequest::new("sweet dog"), None),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.core.refresh(&key).await
        },
    );

    assert!(improved.is_ok());
    assert_eq!(refreshed, AvailabilityState::Available);
    assert_eq!(h.writer.availability_count(), 2);
    assert_eq!(
        h.core.snapshot(),
        vec![(key.clone(), AvailabilityState::Available)]
    );
    assert!(h.core.is_offered(&key));
}

#[tokio::test]
async fn test_undecodable_response_is_retryable_invocation_failure() {
    let h = HarnessBuilder::new()
        .map_proofreader(|_| common::garbled_proofreader())
        .build();

    let err = h.core.proofreader().correct("good boy", None).await.unwrap_err();

    assert!(matches!(err, AssistFailure::InvocationFailed { .. }));
    assert!(err.is_retryable());
    assert_eq!(h.proofreader.create_count(), 1);
}

#[tokio::test]
async fn test_invocation_failure_keeps_session() {
    let h = HarnessBuilder::new()
        .translator_with(Duration::ZERO, true, |t| t)
        .build();
    let translator = h.core.translator();

    for _ in 0..2 {
        let err = translator
            .translate("Good dog", &tag("en"), &tag("ja"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AssistFailure::InvocationFailed { .. }));
        assert!(err.is_retryable());
    }
    assert_eq!(h.translator.create_count(), 1);
}

// =============================================================================
// Classification
// =============================================================================

#[tokio::test]
async fn test_classification_of_well_formed_answer() {
    let h = HarnessBuilder::new().build();

    let analysis = h.core.classifier().analyze(photo(), None).await.unwrap();

    assert_eq!(analysis.animal, Animal::Dog);
    assert_eq!(analysis.breed, "Labrador");
    assert_eq!(analysis.confidence, Some(0.8));
}

#[tokio::test]
async fn test_classification_refusal_falls_back_to_unknown() {
    let h = HarnessBuilder::new()
        .map_classifier(|_| common::classifier("Sorry, I cannot"))
        .build();

    let analysis = h.core.classifier().analyze(photo(), None).await.unwrap();

    assert_eq!(analysis.animal, Animal::Unknown);
    assert_eq!(analysis.breed, "");
    assert_eq!(analysis.raw_text, "Sorry, I cannot");
}

// =============================================================================
// Offering
// =============================================================================

#[tokio::test]
async fn test_is_offered_tracks_latest_probe() {
    let h = HarnessBuilder::new().build();
    let key = CapabilityKey::Writer;

    assert!(h.core.is_offered(&key));

    h.writer.set_token("no");
    assert_eq!(h.core.refresh(&key).await, AvailabilityState::Unavailable);
    assert!(!h.core.is_offered(&key));

    h.writer.set_token("after-download");
    assert_eq!(h.core.refresh(&key).await, AvailabilityState::Downloadable);
    assert!(h.core.is_offered(&key));
}

#[tokio::test]
async fn test_identity_pair_always_offered() {
    let h = HarnessBuilder::new()
        .translator_with(Duration::ZERO, false, |t| t.absent())
        .build();

    assert!(h.core.translator().is_offered(&tag("fr"), &tag("fr")));
    assert!(!h.core.translator().is_offered(&tag("en"), &tag("fr")));
}
