#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::time::{Duration, Instant};

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use spin_wheel::app::{App, ModalState};
    use spin_wheel::config::{Config, SpinConfig};
    use spin_wheel::entries::EntryList;
    use spin_wheel::store::{
        load_entries, load_results, save_entries, FileStore, KeyValueStore, LIST_KEY,
        RESULTS_KEY,
    };

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.spin = SpinConfig {
            turns: 3,
            duration_ms: 200,
        };
        config
    }

    #[test]
    fn test_file_store_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get(LIST_KEY).unwrap(), None);
        assert_eq!(load_entries(&store).unwrap().len(), 5);
        assert!(load_results(&store).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_overwrite_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set(LIST_KEY, &"x".repeat(4096)).unwrap();
        store.set(LIST_KEY, "[]").unwrap();
        assert_eq!(store.get(LIST_KEY).unwrap().as_deref(), Some("[]"));

        // Only the target file remains; no temporary files are left behind
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["list.json".to_string()]);
    }

    #[test]
    fn test_file_store_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let mut store = FileStore::open(&data_dir).unwrap();
        fs::remove_dir(&data_dir).unwrap();

        assert!(store.set(RESULTS_KEY, "[]").is_err());
        assert!(!data_dir.join("results.json").exists());
    }

    #[test]
    fn test_file_store_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_entry_list_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let entries = EntryList::from_text("Ada\nGrace\nAda\nLinus");

        save_entries(&mut store, &entries).unwrap();
        assert!(dir.path().join("list.json").exists());

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(load_entries(&reopened).unwrap(), entries);
    }

    #[test]
    fn test_malformed_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("list.json"), "not json at all").unwrap();
        fs::write(dir.path().join("results.json"), "[1, 2, 3]").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        let entries = load_entries(&store).unwrap();
        assert_eq!(
            entries.labels().collect::<Vec<_>>(),
            vec!["Jason", "Mark", "Amy", "Brandon", "Lisa"]
        );
        assert!(load_results(&store).unwrap().is_empty());
    }

    #[test]
    fn test_spin_persists_winner_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let mut app = App::new(&fast_config(), Box::new(store), StdRng::seed_from_u64(8)).unwrap();

        let t0 = Instant::now();
        app.spin(t0);
        let mut now = t0;
        while app.is_spinning() {
            now += Duration::from_millis(16);
            app.on_frame(now).unwrap();
        }

        let ModalState::Winner(winner) = app.modal_state.clone() else {
            unreachable!("spin finished without a winner dialog");
        };
        app.remove_winner().unwrap();
        drop(app);

        let reopened = FileStore::open(dir.path()).unwrap();
        let results = load_results(&reopened).unwrap();
        assert_eq!(results.results(), &[winner.clone()]);

        let entries = load_entries(&reopened).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries
            .entries()
            .iter()
            .all(|entry| entry.original_index != winner.original_index));

        let raw = reopened.get(RESULTS_KEY).unwrap().unwrap();
        assert!(raw.starts_with(r#"[{"result":"#));
    }

    #[test]
    fn test_removing_every_entry_restores_defaults_next_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let mut app = App::new(&fast_config(), Box::new(store), StdRng::seed_from_u64(2)).unwrap();

        app.enter_edit_mode();
        while !app.text.is_empty() {
            app.delete_char().unwrap();
        }
        assert!(app.entries.is_empty());
        drop(app);

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(LIST_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(load_entries(&reopened).unwrap().len(), 5);
    }
}
