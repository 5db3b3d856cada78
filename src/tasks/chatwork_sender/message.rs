use crate::errors::{AppError, AppResult};

/// Immutable builder for Chatwork message markup.
///
/// Every step returns a new builder; the receiver is left untouched, so
/// intermediate states can be reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBuilder {
    info_open: bool,
    title_open: bool,
    text: String,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_info(&self) -> AppResult<Self> {
        if self.info_open {
            return Err(AppError::state("info already started"));
        }
        let mut next = self.append("[info]");
        next.info_open = true;
        Ok(next)
    }

    pub fn end_info(&self) -> AppResult<Self> {
        if !self.info_open {
            return Err(AppError::state("info not started"));
        }
        let mut next = self.append("[/info]");
        next.info_open = false;
        Ok(next)
    }

    pub fn begin_title(&self) -> AppResult<Self> {
        if self.title_open {
            return Err(AppError::state("title already started"));
        }
        let mut next = self.append("[title]");
        next.title_open = true;
        Ok(next)
    }

    pub fn end_title(&self) -> AppResult<Self> {
        if !self.title_open {
            return Err(AppError::state("title not started"));
        }
        let mut next = self.append("[/title]");
        next.title_open = false;
        Ok(next)
    }

    pub fn with_body(&self, text: &str) -> Self {
        self.append(text)
    }

    pub fn is_valid(&self) -> bool {
        !self.info_open && !self.title_open
    }

    pub fn build(&self) -> AppResult<String> {
        if !self.is_valid() {
            return Err(AppError::state("info or title still open"));
        }
        Ok(self.text.clone())
    }

    fn append(&self, text: &str) -> Self {
        let mut next = self.clone();
        next.text.push_str(text);
        next
    }
}
