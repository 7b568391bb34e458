//! Stream Translator
//!
//! Turns the interleaved text/tool-call delta feed into a mode-exclusive
//! lifecycle event sequence.
//!
//! The vendor never says which kind of entity a chunk belongs to. A tool call
//! is recognised as *starting* only because its first fragment carries a call
//! id; later fragments of the same call omit it. Every chunk is therefore
//! reduced to a [`ChunkSignal`] first, and [`StreamTranslator`] runs purely off
//! that signal:
//!
//! | mode            | signal                      | events                          |
//! |-----------------|-----------------------------|---------------------------------|
//! | any             | `ToolCallStart`             | close current, `ActionExecutionStart`, args |
//! | `TextMessage`   | `TextFragment`, or `ToolCallContinue` with text | `TextMessageContent` |
//! | `TextMessage`   | `Empty` / bare `ToolCallContinue` | nothing                   |
//! | `ActionExecution` | `ToolCallContinue`        | `ActionExecutionArgs` (text dropped) |
//! | `ActionExecution` | `TextFragment` / `Empty`  | `ActionExecutionEnd`, then maybe text |
//! | `None`          | `TextFragment`, or `ToolCallContinue` with text | `TextMessageStart`, content |
//! | `None`          | `Empty` / bare `ToolCallContinue` | nothing                   |
//!
//! Text is only closed by a competing tool-call start or by the end of the
//! stream, while an action also ends as soon as the tool-call channel goes
//! silent.

mod drive;

pub use drive::drive;

use crate::stream::DeltaChunk;
use crate::types::RuntimeEvent;

/// Which entity is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    None,
    TextMessage,
    ActionExecution,
}

/// Normalized meaning of a single delta chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSignal {
    /// Non-empty text fragment
    TextFragment { chunk_id: String, text: String },
    /// First fragment of a new tool call
    ToolCallStart {
        call_id: String,
        name: String,
        arguments: Option<String>,
    },
    /// Later fragment of the current tool call, possibly alongside a text
    /// fragment of the same chunk
    ToolCallContinue {
        chunk_id: String,
        arguments: Option<String>,
        text: Option<String>,
    },
    /// No payload
    Empty,
}

impl ChunkSignal {
    pub fn starts_tool_call(&self) -> bool {
        matches!(self, Self::ToolCallStart { .. })
    }

    pub fn has_tool_call(&self) -> bool {
        matches!(
            self,
            Self::ToolCallStart { .. } | Self::ToolCallContinue { .. }
        )
    }
}

impl From<DeltaChunk> for ChunkSignal {
    fn from(chunk: DeltaChunk) -> Self {
        let DeltaChunk {
            id,
            content,
            tool_call,
        } = chunk;

        let text = content.filter(|text| !text.is_empty());

        let Some(fragment) = tool_call else {
            return match text {
                Some(text) => Self::TextFragment { chunk_id: id, text },
                None => Self::Empty,
            };
        };

        match fragment.id.filter(|call_id| !call_id.is_empty()) {
            Some(call_id) => {
                if text.is_some() {
                    tracing::warn!(
                        chunk_id = %id,
                        "chunk starts a tool call and carries text; dropping the text"
                    );
                }
                Self::ToolCallStart {
                    call_id,
                    name: fragment.name.unwrap_or_default(),
                    arguments: fragment.arguments,
                }
            }
            None => Self::ToolCallContinue {
                chunk_id: id,
                arguments: fragment.arguments,
                text,
            },
        }
    }
}

fn push_args(events: &mut Vec<RuntimeEvent>, arguments: Option<String>) {
    if let Some(args) = arguments.filter(|args| !args.is_empty()) {
        events.push(RuntimeEvent::ActionExecutionArgs { args });
    }
}

/// The translation state machine.
///
/// Feed chunks with [`push`](Self::push) in arrival order, then call
/// [`finish`](Self::finish) exactly once; `finish` consumes the translator so
/// `Complete` cannot be emitted twice.
#[derive(Debug, Default)]
pub struct StreamTranslator {
    mode: Mode,
}

impl StreamTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently open entity
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Translate one raw chunk
    pub fn push(&mut self, chunk: DeltaChunk) -> Vec<RuntimeEvent> {
        self.apply(ChunkSignal::from(chunk))
    }

    /// Translate one normalized signal
    pub fn apply(&mut self, signal: ChunkSignal) -> Vec<RuntimeEvent> {
        let mut events = Vec::with_capacity(3);

        // Close phase
        match self.mode {
            Mode::TextMessage if signal.starts_tool_call() => {
                events.push(RuntimeEvent::TextMessageEnd);
                self.mode = Mode::None;
            }
            Mode::ActionExecution if !signal.has_tool_call() || signal.starts_tool_call() => {
                if let ChunkSignal::TextFragment { chunk_id, .. } = &signal {
                    // Arguments interleaved with text would be cut off here.
                    tracing::warn!(
                        chunk_id = %chunk_id,
                        "text fragment arrived while an action was open; closing the action"
                    );
                }
                events.push(RuntimeEvent::ActionExecutionEnd);
                self.mode = Mode::None;
            }
            _ => {}
        }

        // Open phase
        if self.mode == Mode::None {
            match &signal {
                ChunkSignal::ToolCallStart { call_id, name, .. } => {
                    tracing::debug!(call_id = %call_id, name = %name, "action execution started");
                    events.push(RuntimeEvent::ActionExecutionStart {
                        action_execution_id: call_id.clone(),
                        action_name: name.clone(),
                    });
                    self.mode = Mode::ActionExecution;
                }
                ChunkSignal::TextFragment { chunk_id, .. }
                | ChunkSignal::ToolCallContinue {
                    chunk_id,
                    text: Some(_),
                    ..
                } => {
                    tracing::debug!(message_id = %chunk_id, "text message started");
                    events.push(RuntimeEvent::TextMessageStart {
                        message_id: chunk_id.clone(),
                    });
                    self.mode = Mode::TextMessage;
                }
                ChunkSignal::ToolCallContinue { .. } | ChunkSignal::Empty => {}
            }
        }

        // Content phase
        match (self.mode, signal) {
            (Mode::TextMessage, ChunkSignal::TextFragment { text, .. })
            | (
                Mode::TextMessage,
                ChunkSignal::ToolCallContinue {
                    text: Some(text), ..
                },
            ) => {
                events.push(RuntimeEvent::TextMessageContent { content: text });
            }
            (Mode::ActionExecution, ChunkSignal::ToolCallStart { arguments, .. }) => {
                push_args(&mut events, arguments);
            }
            (
                Mode::ActionExecution,
                ChunkSignal::ToolCallContinue {
                    chunk_id,
                    arguments,
                    text,
                },
            ) => {
                if text.is_some() {
                    tracing::warn!(
                        chunk_id = %chunk_id,
                        "text arrived with argument fragments of an open action; dropping the text"
                    );
                }
                push_args(&mut events, arguments);
            }
            _ => {}
        }

        events
    }

    /// Close whatever is open and emit the terminal `Complete`
    pub fn finish(self) -> Vec<RuntimeEvent> {
        let mut events = Vec::with_capacity(2);
        match self.mode {
            Mode::TextMessage => events.push(RuntimeEvent::TextMessageEnd),
            Mode::ActionExecution => events.push(RuntimeEvent::ActionExecutionEnd),
            Mode::None => {}
        }
        events.push(RuntimeEvent::Complete);
        events
    }
}
