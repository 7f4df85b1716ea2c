//! Small building blocks for assembling model prompts out of titled sections.

use std::fmt;

/// A component of a prompt.
pub trait PromptComponent {
    fn render(&self) -> String;
}

/// An ordered list of components, rendered with a blank line between them.
pub struct Prompt {
    components: Vec<Box<dyn PromptComponent + Send + Sync>>,
}

impl Prompt {
    pub fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(|c| c.render()).collect();
        f.write_str(&rendered.join("\n\n"))
    }
}

/// A builder for creating prompts.
#[derive(Default)]
pub struct PromptBuilder {
    components: Vec<Box<dyn PromptComponent + Send + Sync>>,
}

impl PromptBuilder {
    pub fn add(mut self, component: impl PromptComponent + Send + Sync + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn build(self) -> Prompt {
        Prompt {
            components: self.components,
        }
    }
}

fn titled(title: &str, body: &str) -> String {
    format!("### {title} ###\n{body}")
}

fn numbered(steps: &[String]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bulleted(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A block of instructions: free text or numbered steps.
pub struct Instruction {
    text: String,
}

impl Instruction {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Instructions rendered as a numbered list starting at 1.
    pub fn steps(steps: &[&str]) -> Self {
        Self {
            text: numbered(&owned(steps)),
        }
    }
}

impl PromptComponent for Instruction {
    fn render(&self) -> String {
        titled("Instruction", &self.text)
    }
}

/// A block of background facts.
pub struct Context {
    text: String,
}

impl Context {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Facts rendered as a bulleted list.
    pub fn facts(facts: &[String]) -> Self {
        Self {
            text: bulleted(facts),
        }
    }
}

impl PromptComponent for Context {
    fn render(&self) -> String {
        titled("Context", &self.text)
    }
}

/// The persona the model should adopt.
pub struct Persona {
    text: String,
}

impl Persona {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl PromptComponent for Persona {
    fn render(&self) -> String {
        titled("Persona", &self.text)
    }
}

/// A section with a caller-chosen title and numbered rules.
pub struct Section {
    title: String,
    rules: Vec<String>,
}

impl Section {
    pub fn new(title: &str, rules: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            rules: owned(rules),
        }
    }
}

impl PromptComponent for Section {
    fn render(&self) -> String {
        titled(&self.title, &numbered(&self.rules))
    }
}

/// A plain `Title:` header followed by bullet points, without the `###` framing.
///
/// Meant for blocks inlined into a user message rather than a system prompt.
pub struct Bullets {
    title: String,
    items: Vec<String>,
}

impl Bullets {
    pub fn new(title: &str, items: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            items,
        }
    }
}

impl PromptComponent for Bullets {
    fn render(&self) -> String {
        format!("{}:\n{}", self.title, bulleted(&self.items))
    }
}

/// A single input/output example.
pub struct Example {
    input: String,
    output: String,
}

impl Example {
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
        }
    }
}

impl PromptComponent for Example {
    fn render(&self) -> String {
        format!("Input: {}\nOutput: {}", self.input, self.output)
    }
}

/// A titled list of examples.
pub struct FewShot {
    examples: Vec<Example>,
}

impl FewShot {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }
}

impl PromptComponent for FewShot {
    fn render(&self) -> String {
        let body = self
            .examples
            .iter()
            .map(|e| e.render())
            .collect::<Vec<String>>()
            .join("\n\n");
        titled("Examples", &body)
    }
}

/// The desired shape of the answer.
pub struct OutputFormat {
    format_description: String,
}

impl OutputFormat {
    pub fn new(format_description: &str) -> Self {
        Self {
            format_description: format_description.to_string(),
        }
    }
}

impl PromptComponent for OutputFormat {
    fn render(&self) -> String {
        titled(
            "Output Format",
            &format!(
                "Your response must be in the following format:\n{}",
                self.format_description
            ),
        )
    }
}
