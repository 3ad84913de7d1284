    use super::*;
    use crate::remote::memory::ROOT_ID;
    use crate::remote::{FailureKind, MemoryDrive};

    fn sample_drive() -> (MemoryDrive, String) {
        let mut drive = MemoryDrive::new();
        let dir_a = drive.add_container(ROOT_ID, "dirA");
        drive.add_leaf(&dir_a, "file1", "text/plain");
        let dir_b = drive.add_container(&dir_a, "dirB");
        drive.add_leaf(&dir_b, "file2", "application/pdf");
        drive.add_container(&dir_b, "empty");
        drive.add_leaf(ROOT_ID, "notes.txt", "text/plain");
        (drive, dir_b)
    }

    #[test]
    fn enumerates_the_whole_subtree_once() {
        let (drive, _) = sample_drive();
        let mut mirror = Mirror::new(&drive, ROOT_ID, None);
        let root = mirror.root();

        let stats = enumerate(&mut mirror, root).unwrap();
        assert_eq!(
            stats,
            Enumeration {
                containers: 4,
                leaves: 3,
                fetched: 4,
            }
        );
        assert_eq!(mirror.index().len(), 7);

        let again = enumerate(&mut mirror, root).unwrap();
        assert_eq!(again.fetched, 0);
        assert_eq!(drive.total_calls(), 4);
    }

    #[test]
    fn reuses_containers_fetched_during_navigation() {
        let (drive, _) = sample_drive();
        let mut mirror = Mirror::new(&drive, ROOT_ID, None);
        let root = mirror.root();
        mirror.populate(root).unwrap();
        let dir_a = mirror.child(root, "dirA").unwrap();
        mirror.populate(dir_a).unwrap();

        let stats = enumerate(&mut mirror, dir_a).unwrap();
        assert_eq!(stats.containers, 3);
        assert_eq!(stats.fetched, 2);
        assert_eq!(drive.calls_for(ROOT_ID), 1);
    }

    #[test]
    fn empty_container_is_a_success() {
        let drive = MemoryDrive::new();
        let mut mirror = Mirror::new(&drive, ROOT_ID, None);
        let root = mirror.root();

        let stats = enumerate(&mut mirror, root).unwrap();
        assert_eq!(stats.containers, 1);
        assert_eq!(stats.leaves, 0);
        assert!(mirror.snapshot(root).is_empty());
    }

    #[test]
    fn failure_below_stops_enumeration() {
        let (mut drive, dir_b) = sample_drive();
        drive.fail_listing(&dir_b, FailureKind::Unavailable);
        let mut mirror = Mirror::new(&drive, ROOT_ID, None);
        let root = mirror.root();

        let err = enumerate(&mut mirror, root).unwrap_err();
        assert!(matches!(err, RemoteError::Transient(_)));
    }

    #[test]
    fn deep_hierarchies_do_not_recurse() {
        const DEPTH: usize = 2_000;
        let mut drive = MemoryDrive::new();
        let mut parent = ROOT_ID.to_string();
        for _ in 0..DEPTH {
            parent = drive.add_container(&parent, "d");
        }
        drive.add_leaf(&parent, "bottom", "text/plain");

        let mut mirror = Mirror::new(&drive, ROOT_ID, None);
        let root = mirror.root();
        let stats = enumerate(&mut mirror, root).unwrap();

        assert_eq!(stats.containers, DEPTH + 1);
        let snapshot = mirror.snapshot(root);
        assert_eq!(snapshot.len(), 1);
        let key = snapshot.keys().next().unwrap();
        assert!(key.ends_with("/d/bottom"));
    }
