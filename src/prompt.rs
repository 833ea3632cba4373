use crate::models::ChatMessage;

/// Instruction sent as the system message on every live request.
pub const SYSTEM_INSTRUCTION: &str = "You are a Prompt Engineer. Given a Role, Context, and Task, your job is to:\n\
- Rewrite a short and effective prompt for GPT use\n\
- Specify the expected response format\n\
- List any assumptions made\n\
\n\
Be clear, concise, and helpful.";

/// The three fields captured by the input form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub role: String,
    pub context: String,
    pub task: String,
}

impl PromptRequest {
    pub fn new(role: impl Into<String>, context: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            context: context.into(),
            task: task.into(),
        }
    }

    /// Role and task must hold something other than whitespace.
    pub fn has_required_fields(&self) -> bool {
        !self.role.trim().is_empty() && !self.task.trim().is_empty()
    }
}

/// Builds the `(system, user)` message pair for a request.
pub fn build(request: &PromptRequest) -> (ChatMessage, ChatMessage) {
    build_with_instruction(request, SYSTEM_INSTRUCTION)
}

/// Same as [`build`] but with a caller-supplied system instruction.
pub fn build_with_instruction(request: &PromptRequest, instruction: &str) -> (ChatMessage, ChatMessage) {
    let user = format!(
        "Role: {}\nContext: {}\nTask: {}",
        request.role, request.context, request.task
    );
    (ChatMessage::system(instruction), ChatMessage::user(user))
}
