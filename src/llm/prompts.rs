//! Prompt construction for the simplify endpoint.
//!
//! Turns (text, language, target audience, output format, dictionary) into the
//! single user prompt sent to the completion provider. Audience and format
//! labels map through fixed tables; unknown labels contribute an empty
//! instruction instead of failing.

use std::fmt::Write;

use thiserror::Error;

use crate::store::DictionaryEntry;

pub const DEFAULT_LANGUAGE: &str = "Dutch";
pub const DEFAULT_AUDIENCE: &str = "Algemeen";
pub const DEFAULT_FORMAT: &str = "Samenvatting";

pub const LIST_AVOIDANCE_DIRECTIVE: &str = "Important: do not use numbered lists or bullet points.";
pub const IMAGE_DIRECTIVE: &str =
    "Also suggest a compelling image description to go with the post.";
pub const DICTIONARY_HEADER: &str =
    "Use the following dictionary for simplification. Replace each original term with its simplified term:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAudience {
    Algemeen,
    Jongeren,
    Ouderen,
}

impl TargetAudience {
    const TABLE: [(TargetAudience, &'static str, &'static str); 3] = [
        (
            TargetAudience::Algemeen,
            "Algemeen",
            "Write for a broad, general audience in a plain and relatable tone, like \"your uncle at the family party\".",
        ),
        (
            TargetAudience::Jongeren,
            "Jongeren",
            "Write for young people in a modern, engaging and slightly informal tone. Relevant slang is allowed, but the text must stay clear.",
        ),
        (
            TargetAudience::Ouderen,
            "Ouderen",
            "Write for older people in a formal, respectful and very clear tone. Use no jargon and keep the sentence structure simple.",
        ),
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(a, _, _)| *a)
    }

    // rows are in declaration order, so the discriminant is the row index
    pub fn instruction(self) -> &'static str {
        Self::TABLE[self as usize].2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Samenvatting,
    Instagram,
    LinkedIn,
    Opsommingstekens,
}

impl OutputFormat {
    const TABLE: [(OutputFormat, &'static str, &'static str); 4] = [
        (
            OutputFormat::Samenvatting,
            "Samenvatting",
            "Output format: a concise summary.",
        ),
        (
            OutputFormat::Instagram,
            "Korte versie (Instagram-achtig)",
            "Output format: a very short, attention-grabbing post in the style of Instagram. Add relevant hashtags and emojis.",
        ),
        (
            OutputFormat::LinkedIn,
            "Medium versie (LinkedIn-achtig)",
            "Output format: a professional and informative post of medium length in the style of LinkedIn. Highlight the key takeaways and end with a call to action if applicable.",
        ),
        (
            OutputFormat::Opsommingstekens,
            "Opsommingstekens",
            "Output format: present the main points as bullet points.",
        ),
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(f, _, _)| *f)
    }

    pub fn instruction(self) -> &'static str {
        Self::TABLE[self as usize].2
    }

    /// Bullet output is the one format where lists are wanted.
    pub fn allows_lists(self) -> bool {
        self == OutputFormat::Opsommingstekens
    }

    pub fn wants_image(self) -> bool {
        self == OutputFormat::Instagram
    }
}

/// Audience instruction for a raw label, empty for anything unrecognized.
pub fn audience_instruction(label: &str) -> &'static str {
    TargetAudience::from_label(label)
        .map(TargetAudience::instruction)
        .unwrap_or("")
}

/// Format instruction for a raw label, empty for anything unrecognized.
pub fn format_instruction(label: &str) -> &'static str {
    OutputFormat::from_label(label)
        .map(OutputFormat::instruction)
        .unwrap_or("")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Text is required for simplification.")]
    MissingText,
}

/// Validated simplify input with defaults applied.
/// Audience and format keep the caller's raw label so unknown values pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInput {
    pub text: String,
    pub language: String,
    pub target_audience: String,
    pub output_format: String,
}

impl PromptInput {
    pub fn new(
        text: Option<String>,
        language: Option<String>,
        target_audience: Option<String>,
        output_format: Option<String>,
    ) -> Result<Self, PromptError> {
        let text = text.filter(|t| !t.is_empty()).ok_or(PromptError::MissingText)?;
        Ok(Self {
            text,
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            target_audience: target_audience.unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
            output_format: output_format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        })
    }
}

/// Compose the full prompt. Pure: same input, same string.
pub fn compose(input: &PromptInput, dictionary: &[DictionaryEntry]) -> String {
    let format = OutputFormat::from_label(&input.output_format);
    let language = &input.language;

    let mut prompt = format!(
        r#"You are a helpful assistant that simplifies complex {language} political texts. {audience}
Use clear, active, empathetic and non-condescending language.
Write short sentences and short words, with no more than 3 syllables per word. Only use longer words when clarity or the tone for the audience requires it.
Avoid technical jargon. If a technical term cannot be avoided, rephrase it in plain words.
"#,
        audience = audience_instruction(&input.target_audience),
    );

    if !format.is_some_and(OutputFormat::allows_lists) {
        prompt.push_str(LIST_AVOIDANCE_DIRECTIVE);
        prompt.push('\n');
    }

    prompt.push_str(
        r#"
Follow this structure and separate the parts with a line containing only ---:
1. Emotional Core Message: open with a strong emotional statement about people.
---
2. Problem Statement: name the problem briefly and clearly.
---
3. Concluding Message: end with a clear and impactful closing message.

"#,
    );

    prompt.push_str(format_instruction(&input.output_format));
    prompt.push('\n');

    if !dictionary.is_empty() {
        prompt.push('\n');
        prompt.push_str(DICTIONARY_HEADER);
        prompt.push('\n');
        for entry in dictionary {
            // writing into a String cannot fail
            let _ = writeln!(prompt, "- {}: {}", entry.original_term, entry.simplified_term);
        }
    }

    if format.is_some_and(OutputFormat::wants_image) {
        prompt.push('\n');
        prompt.push_str(IMAGE_DIRECTIVE);
        prompt.push('\n');
    }

    let _ = write!(
        prompt,
        "\nRespond in {language}. Keep the tone strongly connotated and impactful. Simplify the following text:\n\n\"{}\"",
        input.text
    );

    prompt
}
