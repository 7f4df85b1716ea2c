use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Rough token count: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Conversation history bounded by a token budget.
///
/// Oldest exchanges are evicted first once the budget is exceeded. Lives for one
/// session; [`ChatMemory::clear`] resets it.
#[derive(Debug, Clone)]
pub struct ChatMemory {
    token_limit: usize,
    turns: Vec<ChatTurn>,
}

impl ChatMemory {
    pub fn new(token_limit: usize) -> Self {
        Self {
            token_limit,
            turns: Vec::new(),
        }
    }

    /// Records one exchange and trims the history back under the budget.
    pub fn record(&mut self, user: &str, assistant: &str) {
        self.turns.push(ChatTurn {
            role: Role::User,
            content: user.to_string(),
        });
        self.turns.push(ChatTurn {
            role: Role::Assistant,
            content: assistant.to_string(),
        });
        self.evict();
    }

    /// Drops whole exchanges, oldest first, so the history always opens with a user turn.
    fn evict(&mut self) {
        let mut total = self.token_count();
        let mut drop = 0;
        while total > self.token_limit && drop < self.turns.len() {
            total -= self.turns[drop..]
                .iter()
                .take(2)
                .map(|t| estimate_tokens(&t.content))
                .sum::<usize>();
            drop = (drop + 2).min(self.turns.len());
        }
        self.turns.drain(..drop);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn token_count(&self) -> usize {
        self.turns.iter().map(|t| estimate_tokens(&t.content)).sum()
    }

    pub fn token_limit(&self) -> usize {
        self.token_limit
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens("abcdefghi"), 3);
    }

    #[test]
    fn records_in_order() {
        let mut memory = ChatMemory::new(100);
        memory.record("hi", "hello");
        let turns = memory.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].content, "hello");
    }

    #[test]
    fn evicts_oldest_turns_over_budget() {
        // each message is 8 chars = 2 tokens, limit fits two exchanges
        let mut memory = ChatMemory::new(8);
        memory.record("question", "answer01");
        memory.record("second_q", "second_a");
        assert_eq!(memory.turns().len(), 4);

        memory.record("third_qq", "third_aa");
        assert!(memory.token_count() <= 8);
        assert_eq!(memory.turns().len(), 4);
        assert_eq!(memory.turns()[0].content, "second_q");
    }

    #[test]
    fn oversized_exchange_empties_memory() {
        let mut memory = ChatMemory::new(2);
        memory.record(&"x".repeat(40), "y");
        assert!(memory.is_empty());
    }

    #[test]
    fn eviction_keeps_exchanges_whole() {
        // 12 tokens, then 3 tokens: the whole first exchange must go
        let mut memory = ChatMemory::new(4);
        memory.record("q", &"a".repeat(44));
        memory.record("again", "ok");
        let turns = memory.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "again");
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn clear_resets() {
        let mut memory = ChatMemory::new(100);
        memory.record("a", "b");
        memory.clear();
        assert!(memory.is_empty());
    }
}
