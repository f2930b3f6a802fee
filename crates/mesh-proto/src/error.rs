use std::process::ExitStatus;

/// Characters of the offending JSON kept for diagnostics.
pub const PARSE_EXCERPT_CHARS: usize = 1000;

/// Terminal failures of one harvest run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("external tool failed: {reason}")]
    ExternalTool { reason: ToolFailure },

    #[error("couldn't find 'Nodes in mesh:' and/or 'Preferences:' in tool output; raw output:\n{raw}")]
    MalformedReport { raw: String },

    #[error("can't parse node JSON: {message}; leading text:\n{excerpt}")]
    Parse { message: String, excerpt: String },

    #[error("influx write failed: {0}")]
    Write(WriteFailure),
}

#[derive(Debug, thiserror::Error)]
pub enum ToolFailure {
    #[error("mesh host is empty")]
    EmptyHost,

    #[error("could not start `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` exited with {status}; stderr:\n{stderr}")]
    NonZeroExit {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{tool}` did not finish within {secs}s")]
    TimedOut { tool: String, secs: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    #[error("request error: {0}")]
    Transport(String),

    #[error("server answered {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl PipelineError {
    pub fn parse(message: impl Into<String>, text: &str) -> Self {
        Self::Parse {
            message: message.into(),
            excerpt: text.chars().take(PARSE_EXCERPT_CHARS).collect(),
        }
    }
}
