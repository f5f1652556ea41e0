/// One user utterance paired with its (possibly pending) assistant reply.
///
/// `user` is fixed at construction. `bot` is empty while the reply is
/// pending and is filled exactly once by [`Exchange::answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    user: String,
    bot: String,
}

impl Exchange {
    pub(crate) fn pending(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: String::new(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn bot(&self) -> &str {
        &self.bot
    }

    pub fn is_pending(&self) -> bool {
        self.bot.is_empty()
    }

    /// Fill in the reply. Returns `false` if the exchange was already answered.
    pub(crate) fn answer(&mut self, reply: impl Into<String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.bot = reply.into();
        true
    }
}

#[cfg(any(test, feature = "bench"))]
impl Exchange {
    pub fn answered(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }
}
