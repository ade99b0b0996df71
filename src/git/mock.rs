use crate::error::{Result, SemtagError};
use crate::git::VersionControl;
use std::cell::{Cell, RefCell};

/// Mock repository for testing without actual git operations
///
/// Counts every call so tests can assert which operations ran.
pub struct MockRepository {
    available: bool,
    clean: bool,
    head_tags: Vec<String>,
    fail_tag_query: bool,
    fail_tag_creation: bool,
    created_tags: RefCell<Vec<String>>,
    availability_calls: Cell<usize>,
    diff_calls: Cell<usize>,
    tag_query_calls: Cell<usize>,
}

impl MockRepository {
    /// An installed tool with a clean tree and no tags
    pub fn new() -> Self {
        MockRepository {
            available: true,
            clean: true,
            head_tags: Vec::new(),
            fail_tag_query: false,
            fail_tag_creation: false,
            created_tags: RefCell::new(Vec::new()),
            availability_calls: Cell::new(0),
            diff_calls: Cell::new(0),
            tag_query_calls: Cell::new(0),
        }
    }

    /// A host without git installed
    pub fn unavailable() -> Self {
        MockRepository {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_dirty_tree(mut self) -> Self {
        self.clean = false;
        self
    }

    /// Tags pointing at the current commit
    pub fn with_head_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.head_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_failing_tag_query(mut self) -> Self {
        self.fail_tag_query = true;
        self
    }

    pub fn with_failing_tag_creation(mut self) -> Self {
        self.fail_tag_creation = true;
        self
    }

    /// Tags passed to [VersionControl::create_tag], in call order
    pub fn created_tags(&self) -> Vec<String> {
        self.created_tags.borrow().clone()
    }

    pub fn availability_calls(&self) -> usize {
        self.availability_calls.get()
    }

    pub fn diff_calls(&self) -> usize {
        self.diff_calls.get()
    }

    pub fn tag_query_calls(&self) -> usize {
        self.tag_query_calls.get()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockRepository {
    fn is_available(&self) -> bool {
        self.availability_calls.set(self.availability_calls.get() + 1);
        self.available
    }

    fn has_no_unstaged_changes(&self) -> bool {
        self.diff_calls.set(self.diff_calls.get() + 1);
        self.clean
    }

    fn tags_at_head(&self) -> Result<Vec<String>> {
        self.tag_query_calls.set(self.tag_query_calls.get() + 1);
        if self.fail_tag_query {
            return Err(SemtagError::command("fatal: no names found"));
        }
        Ok(self.head_tags.clone())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.created_tags.borrow_mut().push(name.to_string());
        if self.fail_tag_creation {
            return Err(SemtagError::tag_creation(format!(
                "fatal: tag '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}
