//! Reading paths out of a shell item collection.

use horizon_dialog_core::{Result, to_forward_slashes};

/// An ordered collection of shell items, as returned by the folder picker.
pub trait ShellItems {
    /// Number of items.
    fn count(&self) -> Result<u32>;

    /// Filesystem path of the item at `index`.
    fn path_at(&self, index: u32) -> Result<String>;
}

/// All paths in picker order, forward-slash normalized.
pub fn collect_paths<I: ShellItems + ?Sized>(items: &I) -> Result<Vec<String>> {
    (0..items.count()?)
        .map(|idx| items.path_at(idx).map(|path| to_forward_slashes(&path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use horizon_dialog_core::DialogError;

    use super::*;

    struct FakeItems(Vec<&'static str>);

    impl ShellItems for FakeItems {
        fn count(&self) -> Result<u32> {
            Ok(self.0.len() as u32)
        }

        fn path_at(&self, index: u32) -> Result<String> {
            self.0
                .get(index as usize)
                .map(|p| (*p).to_string())
                .ok_or_else(|| DialogError::native("items.GetItemAt", 0x8007_0057))
        }
    }

    #[test]
    fn test_paths_in_picker_order() {
        let items = FakeItems(vec![r"C:\x", r"C:\y"]);
        assert_eq!(collect_paths(&items).unwrap(), vec!["C:/x", "C:/y"]);
    }

    #[test]
    fn test_already_normalized_paths() {
        let items = FakeItems(vec!["C:/x", "C:/y"]);
        assert_eq!(collect_paths(&items).unwrap(), vec!["C:/x", "C:/y"]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(collect_paths(&FakeItems(Vec::new())).unwrap().is_empty());
    }
}
