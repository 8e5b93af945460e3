use crate::domain::{Column, LinkOperation};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("store index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no selectable entry in the active partition")]
    NoSelection,
}

/// One candidate file. `managed` is the only field that ever changes after
/// ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub path: PathBuf,
    pub managed: bool,
}

/// The single source of truth for classification. Entries keep their
/// discovery order for the whole session; partitions are derived views over
/// this order, which is what rules out index drift between the two columns.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn load<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        Self {
            entries: items
                .into_iter()
                .map(|(label, path)| Entry {
                    label,
                    path,
                    managed: false,
                })
                .collect(),
        }
    }

    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flips classification for exactly one entry. An out-of-range index
    /// cannot be produced by the partition view, so it is an internal
    /// invariant violation: fatal in debug builds, a caller-absorbed error
    /// in release builds.
    pub fn set_managed(&mut self, index: usize, managed: bool) -> Result<(), EngineError> {
        let len = self.entries.len();
        let Some(entry) = self.entries.get_mut(index) else {
            debug_assert!(false, "store index {index} out of range (len {len})");
            return Err(EngineError::IndexOutOfRange { index, len });
        };
        entry.managed = managed;
        Ok(())
    }

    /// The ordered partition for one classification, carrying each surviving
    /// entry's store index so a visible position can be resolved back to the
    /// store without ambiguity.
    pub fn partition(&self, managed: bool) -> Vec<(usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.managed == managed)
            .collect()
    }

    pub fn partition_len(&self, managed: bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.managed == managed)
            .count()
    }
}

/// Cursor and scroll offset for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub cursor: usize,
    pub scroll_offset: usize,
}

/// Navigation state for both columns plus the active-column tag. The
/// viewport height comes from the renderer; everything else is owned here.
#[derive(Debug, Clone)]
pub struct Navigator {
    active: Column,
    columns: [NavState; 2],
    viewport_height: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            active: Column::Unmanaged,
            columns: [NavState::default(); 2],
            viewport_height: 10,
        }
    }
}

impl Navigator {
    pub fn active_column(&self) -> Column {
        self.active
    }

    pub fn state(&self, column: Column) -> NavState {
        self.columns[column.index()]
    }

    pub fn set_viewport_height(&mut self, rows: usize) {
        self.viewport_height = rows.max(1);
    }

    /// Resets both columns and focuses the unmanaged one. Used after the
    /// store is replaced by a fresh scan.
    pub fn reset(&mut self) {
        self.active = Column::Unmanaged;
        self.columns = [NavState::default(); 2];
    }

    pub fn move_up(&mut self) {
        let state = &mut self.columns[self.active.index()];
        state.cursor = state.cursor.saturating_sub(1);
        if state.cursor < state.scroll_offset {
            state.scroll_offset = state.cursor;
        }
    }

    /// `n` is the current length of the active partition.
    pub fn move_down(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let rows = self.viewport_height;
        let state = &mut self.columns[self.active.index()];
        state.cursor = (state.cursor + 1).min(n - 1);
        if state.cursor >= state.scroll_offset + rows {
            state.scroll_offset = state.cursor + 1 - rows;
        }
    }

    /// The two partitions are independent index spaces, so a stale position
    /// is never carried over to the newly active column.
    pub fn switch_column(&mut self) -> Column {
        self.active = self.active.next();
        self.columns[self.active.index()] = NavState::default();
        self.active
    }

    /// Re-establishes the cursor and scroll-window invariants for the active
    /// column after its partition length changed to `n`.
    pub fn reclamp(&mut self, n: usize) {
        let rows = self.viewport_height;
        let state = &mut self.columns[self.active.index()];

        if n == 0 {
            *state = NavState::default();
            return;
        }
        if state.cursor >= n {
            state.cursor = n - 1;
        }

        if n <= rows {
            state.scroll_offset = 0;
            return;
        }
        if state.cursor < state.scroll_offset {
            state.scroll_offset = state.cursor;
        } else if state.cursor >= state.scroll_offset + rows {
            state.scroll_offset = state.cursor + 1 - rows;
        }
        let max_offset = n - rows;
        if state.scroll_offset > max_offset {
            state.scroll_offset = max_offset;
        }
    }
}

/// Moves the entry at a visible (partition-relative) position of the active
/// column into the other partition, then reclamps the active column against
/// its new length. Store order is never touched, so the moved entry shows up
/// in its new partition at the slot its discovery order dictates.
pub fn toggle(
    store: &mut EntryStore,
    nav: &mut Navigator,
    visible_position: usize,
) -> Result<usize, EngineError> {
    let want_managed = nav.active_column().is_managed();
    let store_index = store
        .partition(want_managed)
        .get(visible_position)
        .map(|(index, _)| *index)
        .ok_or(EngineError::NoSelection)?;

    store.set_managed(store_index, !want_managed)?;
    nav.reclamp(store.partition_len(want_managed));
    Ok(store_index)
}

/// One link operation per managed entry, in store order. Pure; executing the
/// plan is somebody else's job.
pub fn plan(store: &EntryStore, target_dir: &Path) -> Vec<LinkOperation> {
    store
        .partition(true)
        .into_iter()
        .map(|(_, entry)| LinkOperation {
            source: entry.path.clone(),
            target_dir: target_dir.to_path_buf(),
            target_path: target_dir.join(&entry.label),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(labels: &[&str]) -> EntryStore {
        EntryStore::load(
            labels
                .iter()
                .map(|label| (label.to_string(), PathBuf::from(format!("/home/u/{label}")))),
        )
    }

    fn labels(partition: &[(usize, &Entry)]) -> Vec<String> {
        partition
            .iter()
            .map(|(_, entry)| entry.label.clone())
            .collect()
    }

    #[test]
    fn load_starts_all_entries_unmanaged() {
        let store = store_with(&["a", "b", "c"]);
        assert!(!store.is_empty());
        assert_eq!(store.len(), 3);
        assert!(store.all().iter().all(|entry| !entry.managed));
        assert_eq!(store.partition_len(false), 3);
        assert_eq!(store.partition_len(true), 0);
    }

    #[test]
    fn partitions_stay_complete_and_disjoint() {
        let mut store = store_with(&["a", "b", "c", "d", "e"]);
        let mut nav = Navigator::default();

        for position in [1, 0, 2] {
            toggle(&mut store, &mut nav, position).expect("toggle");
            let unmanaged = store.partition(false);
            let managed = store.partition(true);
            assert_eq!(unmanaged.len() + managed.len(), store.len());
            for (index, _) in &managed {
                assert!(!unmanaged.iter().any(|(i, _)| i == index));
            }
        }
    }

    #[test]
    fn toggle_preserves_discovery_order_in_both_partitions() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let mut nav = Navigator::default();

        // Move "c" first, then "a": managed must still read a, c.
        toggle(&mut store, &mut nav, 2).expect("toggle c");
        toggle(&mut store, &mut nav, 0).expect("toggle a");

        assert_eq!(labels(&store.partition(false)), vec!["b", "d"]);
        assert_eq!(labels(&store.partition(true)), vec!["a", "c"]);
    }

    #[test]
    fn toggle_twice_restores_classification_and_position() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut nav = Navigator::default();

        toggle(&mut store, &mut nav, 1).expect("toggle b out");
        assert_eq!(labels(&store.partition(false)), vec!["a", "c"]);
        assert_eq!(labels(&store.partition(true)), vec!["b"]);

        nav.switch_column();
        toggle(&mut store, &mut nav, 0).expect("toggle b back");
        assert_eq!(labels(&store.partition(false)), vec!["a", "b", "c"]);
        assert!(store.partition(true).is_empty());
    }

    #[test]
    fn toggle_on_empty_partition_is_a_no_op() {
        let mut store = store_with(&["a"]);
        let mut nav = Navigator::default();
        nav.switch_column();

        assert_eq!(
            toggle(&mut store, &mut nav, 0),
            Err(EngineError::NoSelection)
        );
        assert_eq!(store.partition_len(false), 1);
    }

    #[test]
    fn toggle_out_of_range_position_is_rejected() {
        let mut store = store_with(&["a", "b"]);
        let mut nav = Navigator::default();
        assert_eq!(
            toggle(&mut store, &mut nav, 2),
            Err(EngineError::NoSelection)
        );
    }

    #[test]
    fn move_down_is_bounded_and_scrolls_at_view_edges() {
        let mut nav = Navigator::default();
        nav.set_viewport_height(5);

        for _ in 0..7 {
            nav.move_down(20);
        }
        let state = nav.state(Column::Unmanaged);
        assert_eq!(state.cursor, 7);
        assert_eq!(state.scroll_offset, 3);

        for _ in 0..30 {
            nav.move_down(20);
        }
        let state = nav.state(Column::Unmanaged);
        assert_eq!(state.cursor, 19);
        assert_eq!(state.scroll_offset, 15);
    }

    #[test]
    fn move_up_is_bounded_and_scrolls_at_view_edges() {
        let mut nav = Navigator::default();
        nav.set_viewport_height(5);
        for _ in 0..10 {
            nav.move_down(20);
        }

        for _ in 0..4 {
            nav.move_up();
        }
        let state = nav.state(Column::Unmanaged);
        assert_eq!(state.cursor, 6);
        assert_eq!(state.scroll_offset, 6);

        for _ in 0..30 {
            nav.move_up();
        }
        let state = nav.state(Column::Unmanaged);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn move_down_on_empty_partition_is_a_no_op() {
        let mut nav = Navigator::default();
        nav.move_down(0);
        assert_eq!(nav.state(Column::Unmanaged), NavState::default());
    }

    #[test]
    fn switch_column_resets_the_new_column() {
        let mut nav = Navigator::default();
        nav.set_viewport_height(3);
        for _ in 0..5 {
            nav.move_down(10);
        }
        assert_eq!(nav.switch_column(), Column::Managed);
        assert_eq!(nav.state(Column::Managed), NavState::default());

        // Coming back also starts from the top.
        assert_eq!(nav.switch_column(), Column::Unmanaged);
        assert_eq!(nav.state(Column::Unmanaged), NavState::default());
    }

    #[test]
    fn reclamp_pulls_cursor_back_into_shrunken_partition() {
        let mut nav = Navigator::default();
        nav.set_viewport_height(5);
        for _ in 0..9 {
            nav.move_down(10);
        }
        assert_eq!(nav.state(Column::Unmanaged).cursor, 9);

        nav.reclamp(4);
        let state = nav.state(Column::Unmanaged);
        assert_eq!(state.cursor, 3);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn reclamp_zeroes_offset_when_partition_fits_viewport() {
        let mut nav = Navigator::default();
        nav.set_viewport_height(5);
        for _ in 0..9 {
            nav.move_down(10);
        }
        assert!(nav.state(Column::Unmanaged).scroll_offset > 0);

        nav.reclamp(5);
        let state = nav.state(Column::Unmanaged);
        assert_eq!(state.cursor, 4);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn reclamp_on_empty_partition_pins_cursor_to_zero() {
        let mut nav = Navigator::default();
        for _ in 0..5 {
            nav.move_down(10);
        }
        nav.reclamp(0);
        assert_eq!(nav.state(Column::Unmanaged), NavState::default());
    }

    #[test]
    fn cursor_stays_valid_through_toggles_at_the_bottom() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut nav = Navigator::default();
        nav.move_down(3);
        nav.move_down(3);

        // Toggling the last entry must clamp the cursor to the new end.
        toggle(&mut store, &mut nav, 2).expect("toggle c");
        assert_eq!(nav.state(Column::Unmanaged).cursor, 1);

        toggle(&mut store, &mut nav, 1).expect("toggle b");
        assert_eq!(nav.state(Column::Unmanaged).cursor, 0);

        toggle(&mut store, &mut nav, 0).expect("toggle a");
        assert_eq!(nav.state(Column::Unmanaged), NavState::default());
    }

    #[test]
    fn plan_lists_managed_entries_in_store_order() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut nav = Navigator::default();
        toggle(&mut store, &mut nav, 2).expect("toggle c");
        toggle(&mut store, &mut nav, 0).expect("toggle a");

        let ops = plan(&store, Path::new("/home/u/.stache"));
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].source, PathBuf::from("/home/u/a"));
        assert_eq!(ops[0].target_path, PathBuf::from("/home/u/.stache/a"));
        assert_eq!(ops[1].source, PathBuf::from("/home/u/c"));
        assert_eq!(ops[1].target_path, PathBuf::from("/home/u/.stache/c"));
        assert!(
            ops.iter()
                .all(|op| op.target_dir == PathBuf::from("/home/u/.stache"))
        );
    }

    #[test]
    fn plan_single_managed_entry_scenario() {
        let mut store = EntryStore::load([("b".to_string(), PathBuf::from("/home/u/b"))]);
        store.set_managed(0, true).expect("set managed");

        let ops = plan(&store, Path::new("/home/u/.stache"));
        assert_eq!(
            ops,
            vec![LinkOperation {
                source: PathBuf::from("/home/u/b"),
                target_dir: PathBuf::from("/home/u/.stache"),
                target_path: PathBuf::from("/home/u/.stache/b"),
            }]
        );
    }

    #[test]
    fn plan_is_empty_without_managed_entries() {
        let store = store_with(&["a", "b"]);
        assert!(plan(&store, Path::new("/home/u/.stache")).is_empty());
    }
}
