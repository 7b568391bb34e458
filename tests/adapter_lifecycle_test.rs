//! Adapter lifecycle tests: acknowledgement, cancellation, failures and
//! concurrent runs, driven by in-process chunk sources.

mod support;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use groq_runtime_adapter::prelude::*;
use groq_runtime_adapter::stream::DeltaChunk;
use groq_runtime_adapter::utils::SequentialIdGenerator;
use support::sources::{ScriptedSource, StalledSource};
use support::{collect_until_complete, mock_config};

fn user_request(text: &str) -> ChatCompletionRequest {
    ChatCompletionRequest::new(vec![Message::user("m1", text)])
}

#[tokio::test]
async fn test_acknowledgement_does_not_wait_for_stream() {
    let source = StalledSource {
        prefix: vec![DeltaChunk::text("c1", "Thinking")],
    };
    let adapter = GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(source))
        .with_id_generator(Arc::new(SequentialIdGenerator::new("thread")));
    let (sink, mut receiver) = channel();

    let handle = tokio::time::timeout(
        Duration::from_secs(5),
        adapter.process_with_handle(user_request("Hi"), sink),
    )
    .await
    .expect("acknowledged while the stream is still open")
    .unwrap();
    assert_eq!(handle.thread_id(), "thread-1");

    assert_eq!(
        receiver.recv().await,
        Some(RuntimeEvent::TextMessageStart {
            message_id: "c1".into()
        })
    );
    assert_eq!(
        receiver.recv().await,
        Some(RuntimeEvent::TextMessageContent {
            content: "Thinking".into()
        })
    );
    assert!(!handle.is_finished());

    handle.cancel();
    let rest = collect_until_complete(&mut receiver).await;
    assert_eq!(rest, vec![RuntimeEvent::TextMessageEnd, RuntimeEvent::Complete]);

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, AdapterError::Cancelled));
}

#[tokio::test]
async fn test_cancel_handle_closes_open_action() {
    let source = StalledSource {
        prefix: vec![
            DeltaChunk::tool_call_start("c1", "call_1", "lookup").with_arguments("{\"q\":"),
            DeltaChunk::tool_call_args("c1", "\"ru"),
        ],
    };
    let adapter = GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(source));
    let (sink, mut receiver) = channel();
    let handle = adapter
        .process_with_handle(user_request("Search"), sink)
        .await
        .unwrap();

    // Cancel from another task through a cloned handle.
    let cancel = handle.cancel_handle();
    let mut seen = Vec::new();
    while seen.len() < 3 {
        seen.push(receiver.recv().await.unwrap());
    }
    tokio::spawn(async move { cancel.cancel() });

    seen.extend(collect_until_complete(&mut receiver).await);
    assert_eq!(
        seen,
        vec![
            RuntimeEvent::ActionExecutionStart {
                action_execution_id: "call_1".into(),
                action_name: "lookup".into()
            },
            RuntimeEvent::ActionExecutionArgs {
                args: "{\"q\":".into()
            },
            RuntimeEvent::ActionExecutionArgs { args: "\"ru".into() },
            RuntimeEvent::ActionExecutionEnd,
            RuntimeEvent::Complete,
        ]
    );
    assert!(matches!(handle.wait().await, Err(AdapterError::Cancelled)));
}

#[tokio::test]
async fn test_upstream_failure_is_reported_after_finalization() {
    let source = ScriptedSource::with_items(vec![
        Ok(DeltaChunk::tool_call_start("c1", "call_1", "lookup")),
        Err(AdapterError::StreamError("connection reset".into())),
        Ok(DeltaChunk::text("c2", "never")),
    ]);
    let adapter = GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(source));
    let sink = Arc::new(CollectingSink::new());

    let handle = adapter
        .process_with_handle(user_request("Search"), sink.clone())
        .await
        .unwrap();
    let err = handle.wait().await.unwrap_err();

    assert!(matches!(err, AdapterError::StreamError(_)));
    assert_eq!(
        sink.events(),
        vec![
            RuntimeEvent::ActionExecutionStart {
                action_execution_id: "call_1".into(),
                action_name: "lookup".into()
            },
            RuntimeEvent::ActionExecutionEnd,
            RuntimeEvent::Complete,
        ]
    );
}

#[tokio::test]
async fn test_closed_sink_stops_the_run() {
    let source = ScriptedSource::new(vec![
        DeltaChunk::text("c1", "a"),
        DeltaChunk::text("c1", "b"),
    ]);
    let adapter = GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(source));
    let (sink, receiver) = channel();
    drop(receiver);

    let handle = adapter
        .process_with_handle(user_request("Hi"), sink)
        .await
        .unwrap();
    assert!(matches!(handle.wait().await, Err(AdapterError::SinkClosed)));
}

#[tokio::test]
async fn test_empty_stream_emits_only_complete() {
    let source = ScriptedSource::new(vec![DeltaChunk::empty("c1")]);
    let adapter = GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(source));
    let (sink, mut receiver) = channel();

    adapter.process(user_request("Hi"), sink).await.unwrap();
    assert_eq!(
        collect_until_complete(&mut receiver).await,
        vec![RuntimeEvent::Complete]
    );
}

#[tokio::test]
async fn test_stream_without_chunks_emits_only_complete() {
    let source = ScriptedSource::new(vec![]);
    let opened = source.opened.clone();
    let adapter = GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(source));
    let (sink, mut receiver) = channel();

    let handle = adapter
        .process_with_handle(user_request("Hi"), sink)
        .await
        .unwrap();
    assert_eq!(
        collect_until_complete(&mut receiver).await,
        vec![RuntimeEvent::Complete]
    );
    handle.wait().await.unwrap();
    assert_eq!(opened.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let text_source = ScriptedSource::new(vec![
        DeltaChunk::text("t", "one"),
        DeltaChunk::empty("t"),
        DeltaChunk::text("t", "two"),
    ]);
    let action_source = ScriptedSource::new(vec![
        DeltaChunk::tool_call_start("a", "call_1", "f").with_arguments("{}"),
        DeltaChunk::empty("a"),
    ]);
    let opened = text_source.opened.clone();

    let text_adapter =
        GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(text_source));
    let action_adapter =
        GroqAdapter::with_source(mock_config("http://localhost"), Arc::new(action_source));

    let mut runs = Vec::new();
    for i in 0..8 {
        let (sink, receiver) = channel();
        let handle = if i % 2 == 0 {
            text_adapter.process_with_handle(user_request("text"), sink).await
        } else {
            action_adapter.process_with_handle(user_request("act"), sink).await
        }
        .unwrap();
        runs.push((i, handle, receiver));
    }

    for (i, handle, mut receiver) in runs {
        let events = collect_until_complete(&mut receiver).await;
        handle.wait().await.unwrap();
        let expected = if i % 2 == 0 {
            vec![
                RuntimeEvent::TextMessageStart {
                    message_id: "t".into(),
                },
                RuntimeEvent::TextMessageContent {
                    content: "one".into(),
                },
                RuntimeEvent::TextMessageContent {
                    content: "two".into(),
                },
                RuntimeEvent::TextMessageEnd,
                RuntimeEvent::Complete,
            ]
        } else {
            vec![
                RuntimeEvent::ActionExecutionStart {
                    action_execution_id: "call_1".into(),
                    action_name: "f".into(),
                },
                RuntimeEvent::ActionExecutionArgs { args: "{}".into() },
                RuntimeEvent::ActionExecutionEnd,
                RuntimeEvent::Complete,
            ]
        };
        assert_eq!(events, expected, "run {i}");
    }
    assert_eq!(opened.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_thread_ids_are_unique_by_default() {
    let adapter = GroqAdapter::with_source(
        mock_config("http://localhost"),
        Arc::new(ScriptedSource::new(vec![])),
    );
    let a = adapter
        .process(user_request("a"), CollectingSink::new())
        .await
        .unwrap();
    let b = adapter
        .process(user_request("b"), CollectingSink::new())
        .await
        .unwrap();
    assert!(a.thread_id.starts_with("ck-"));
    assert_ne!(a.thread_id, b.thread_id);
}
