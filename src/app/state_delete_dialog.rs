use crate::app::recorded::{EncodedId, RecordedItem};
use std::fmt;

pub const ORIGINAL_FILE_NAME: &str = "TS";

/// Which file of a recorded item a delete request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteTarget {
    Original,
    Encoded(EncodedId),
}

impl fmt::Display for DeleteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteTarget::Original => write!(f, "original"),
            DeleteTarget::Encoded(id) => write!(f, "encoded {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteFile {
    pub name: String,
    pub target: DeleteTarget,
    pub checked: bool,
}

/// Check list shown in the delete dialog.
#[derive(Debug, Default, Clone)]
pub struct DeleteDialogState {
    files: Vec<DeleteFile>,
}

impl DeleteDialogState {
    /// Rebuilds the list from scratch: original stream first, then encoded
    /// variants in server order, everything checked.
    pub(crate) fn rebuild(&mut self, recorded: &RecordedItem) {
        self.files.clear();
        if recorded.original {
            self.files.push(DeleteFile {
                name: ORIGINAL_FILE_NAME.to_string(),
                target: DeleteTarget::Original,
                checked: true,
            });
        }
        self.files.extend(recorded.encoded.iter().map(|encoded| DeleteFile {
            name: encoded.name.clone(),
            target: DeleteTarget::Encoded(encoded.encoded_id),
            checked: true,
        }));
    }

    pub fn files(&self) -> &[DeleteFile] {
        &self.files
    }

    pub fn set_checked(&mut self, index: usize, checked: bool) -> bool {
        match self.files.get_mut(index) {
            Some(file) => {
                file.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        match self.files.get_mut(index) {
            Some(file) => {
                file.checked = !file.checked;
                true
            }
            None => false,
        }
    }

    /// Unchecks every entry whose name matches, ignoring ASCII case.
    pub fn uncheck_by_name(&mut self, name: &str) -> bool {
        let mut matched = false;
        for file in self.files.iter_mut().filter(|f| f.name.eq_ignore_ascii_case(name)) {
            file.checked = false;
            matched = true;
        }
        matched
    }

    pub fn checked_count(&self) -> usize {
        self.files.iter().filter(|f| f.checked).count()
    }

    /// True when every listed file is checked. An empty list counts as all.
    pub fn is_delete_all(&self) -> bool {
        self.checked_count() == self.files.len()
    }

    pub fn checked_files(&self) -> impl Iterator<Item = &DeleteFile> {
        self.files.iter().filter(|f| f.checked)
    }
}
