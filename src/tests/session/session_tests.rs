    use super::*;
    use crate::remote::memory::ROOT_ID;
    use crate::remote::{FailureKind, MemoryDrive};

    struct Ids {
        dir_a: String,
        dir_b: String,
    }

    // root -> [dirA -> [file1, dirB -> [file2]], notes.txt]
    fn sample_drive() -> (MemoryDrive, Ids) {
        let mut drive = MemoryDrive::new();
        let dir_a = drive.add_container(ROOT_ID, "dirA");
        drive.add_leaf(&dir_a, "file1", "text/plain");
        let dir_b = drive.add_container(&dir_a, "dirB");
        drive.add_leaf(&dir_b, "file2", "application/pdf");
        drive.add_leaf(ROOT_ID, "notes.txt", "text/plain");
        (drive, Ids { dir_a, dir_b })
    }

    fn exec<C: ListingClient>(session: &mut Session<C>, line: &str) -> String {
        let mut out = Vec::new();
        session.execute(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run_script(drive: &MemoryDrive, script: &str) -> (Option<Selection>, String) {
        let mut out = Vec::new();
        let picked =
            run_interactive_session(drive, &SessionOptions::default(), script.as_bytes(), &mut out)
                .unwrap();
        (picked, String::from_utf8(out).unwrap())
    }

    #[test]
    fn start_populates_only_the_root() {
        let (drive, _) = sample_drive();
        let session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(session.pwd(), "~");
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(drive.total_calls(), 1);
        assert_eq!(drive.calls_for(ROOT_ID), 1);
    }

    #[test]
    fn select_captures_every_file_below_the_chosen_directory() {
        let (drive, _) = sample_drive();
        let (picked, out) = run_script(&drive, "cd dirA\nselect\n");

        let selection = picked.unwrap();
        assert_eq!(selection.chosen_path, "~/dirA");
        let keys: Vec<&str> = selection.files.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["/dirB/file2", "/file1"]);
        assert_eq!(selection.files["/dirB/file2"].content_type, "application/pdf");
        assert!(out.contains("Selected ~/dirA"));
        assert!(out.starts_with("~ > ~/dirA > "));
    }

    #[test]
    fn select_with_a_path_never_changes_directory_first() {
        let (drive, _) = sample_drive();
        let (picked, _) = run_script(&drive, "select dirA/dirB\n");

        let selection = picked.unwrap();
        assert_eq!(selection.chosen_path, "~/dirA/dirB");
        assert_eq!(selection.files.keys().collect::<Vec<_>>(), vec!["/file2"]);
    }

    #[test]
    fn selecting_the_root_takes_the_whole_drive() {
        let (drive, _) = sample_drive();
        let (picked, _) = run_script(&drive, "select\n");

        let selection = picked.unwrap();
        assert_eq!(selection.chosen_path, "~");
        assert_eq!(selection.files.len(), 3);
        assert!(selection.files.contains_key("/notes.txt"));
    }

    #[test]
    fn cd_dash_toggles_between_the_last_two_directories() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        exec(&mut session, "cd dirA");
        exec(&mut session, "cd dirB");
        assert_eq!(session.pwd(), "~/dirA/dirB");
        exec(&mut session, "cd -");
        assert_eq!(session.pwd(), "~/dirA");
        exec(&mut session, "cd -");
        assert_eq!(session.pwd(), "~/dirA/dirB");
    }

    #[test]
    fn cd_to_the_same_directory_keeps_previous() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        exec(&mut session, "cd dirA");
        exec(&mut session, "cd .");
        assert_eq!(session.context().previous, session.mirror().root());
    }

    #[test]
    fn failed_cd_leaves_navigation_state_alone() {
        let (drive, ids) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();
        exec(&mut session, "cd dirA");
        let before = *session.context();

        let out = exec(&mut session, "cd missing/dirB");
        assert_eq!(out, "error: no such directory: missing\n");
        assert_eq!(*session.context(), before);
        assert_eq!(drive.calls_for(&ids.dir_b), 0);

        let out = exec(&mut session, "cd ../..");
        assert!(out.starts_with("error: invalid back-reference"));
        let out = exec(&mut session, "cd dirB//x");
        assert_eq!(out, "error: malformed path (empty path segment)\n");
        assert_eq!(*session.context(), before);

        exec(&mut session, "cd -");
        assert_eq!(session.pwd(), "~");
    }

    #[test]
    fn pwd_prints_the_canonical_path() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(exec(&mut session, "pwd"), "~\n");
        exec(&mut session, "cd /dirA/dirB/");
        assert_eq!(exec(&mut session, "pwd"), "~/dirA/dirB\n");
    }

    #[test]
    fn ls_lists_immediate_children() {
        let (drive, ids) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(exec(&mut session, "ls"), "├── dirA/\n└── notes.txt\n");
        assert_eq!(exec(&mut session, "ls dirA"), "├── file1\n└── dirB/\n");
        // The listed directory is fetched, its subdirectories are not.
        assert_eq!(drive.calls_for(&ids.dir_a), 1);
        assert_eq!(drive.calls_for(&ids.dir_b), 0);
        assert_eq!(session.pwd(), "~");
    }

    #[test]
    fn ls_recursive_draws_the_whole_subtree() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        let out = exec(&mut session, "ls -r");
        assert_eq!(
            out,
            "├── dirA/\n│   ├── file1\n│   └── dirB/\n│       └── file2\n└── notes.txt\n"
        );
        assert_eq!(drive.total_calls(), 3);
    }

    #[test]
    fn ls_with_a_bad_path_prints_only_the_error() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(
            exec(&mut session, "ls nowhere"),
            "error: no such directory: nowhere\n"
        );
    }

    #[test]
    fn ls_of_a_path_that_does_not_move_renders_nothing() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(exec(&mut session, "ls ."), "");
        assert_eq!(exec(&mut session, "ls ~"), "");
        assert_eq!(exec(&mut session, "ls /"), "");
        assert_eq!(exec(&mut session, "ls -r dirA/.."), "");

        exec(&mut session, "cd dirA");
        assert_eq!(exec(&mut session, "ls ~/dirA/"), "");
        assert_eq!(exec(&mut session, "ls .."), "├── dirA/\n└── notes.txt\n");
    }

    #[test]
    fn select_of_a_path_that_does_not_move_aborts() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(exec(&mut session, "select ."), "Aborting selection...\n");
        assert_eq!(exec(&mut session, "select -"), "Aborting selection...\n");
        assert_eq!(session.state(), SessionState::Running);

        exec(&mut session, "cd dirA");
        assert_eq!(exec(&mut session, "select ~/dirA"), "Aborting selection...\n");
        assert_eq!(session.state(), SessionState::Running);

        assert_eq!(exec(&mut session, "select"), "Selected ~/dirA\n");
        assert_eq!(
            session.state(),
            SessionState::Finishing {
                chosen: session.context().current
            }
        );
    }

    #[test]
    fn select_of_a_missing_path_aborts_and_keeps_running() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        let out = exec(&mut session, "select missing");
        assert_eq!(
            out,
            "error: no such directory: missing\nAborting selection...\n"
        );
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.pwd(), "~");
    }

    #[test]
    fn select_aborts_when_enumeration_fails() {
        let (mut drive, ids) = sample_drive();
        drive.fail_listing(&ids.dir_b, FailureKind::Unavailable);
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        let out = exec(&mut session, "select dirA");
        assert!(out.starts_with("error: "));
        assert!(out.ends_with("Aborting selection...\n"));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn exit_and_end_of_input_select_nothing() {
        let (drive, _) = sample_drive();

        let (picked, _) = run_script(&drive, "cd dirA\nexit\nselect\n");
        assert!(picked.is_none());
        let (picked, _) = run_script(&drive, "quit\n");
        assert!(picked.is_none());
        let (picked, out) = run_script(&drive, "cd dirA\n");
        assert!(picked.is_none());
        assert!(out.ends_with("~/dirA > \n"));
    }

    #[test]
    fn commands_after_termination_are_ignored() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        exec(&mut session, "exit");
        assert_eq!(exec(&mut session, "pwd"), "");
        assert_eq!(session.state(), SessionState::Exiting);
        assert!(session.finish().is_none());
    }

    #[test]
    fn unknown_commands_and_bad_usage_are_reported() {
        let (drive, _) = sample_drive();
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        assert_eq!(
            exec(&mut session, "frob"),
            "unknown command `frob` (try `help`)\n"
        );
        assert_eq!(exec(&mut session, "cd"), "usage: cd <path>\n");
        assert_eq!(exec(&mut session, "cd 'dirA"), "error: unterminated quote\n");
        assert_eq!(exec(&mut session, ""), "");
        assert!(exec(&mut session, "help").contains("select [path]"));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn transient_failures_do_not_end_the_session() {
        let (mut drive, ids) = sample_drive();
        drive.fail_listing(&ids.dir_a, FailureKind::Unavailable);
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        let out = exec(&mut session, "cd dirA");
        assert!(out.starts_with("error: "));
        assert_eq!(session.pwd(), "~");
        assert_eq!(session.state(), SessionState::Running);
        // Not marked populated, so the next attempt fetches again.
        exec(&mut session, "cd dirA");
        assert_eq!(drive.calls_for(&ids.dir_a), 2);
    }

    #[test]
    fn authorization_failures_end_the_session() {
        let (mut drive, ids) = sample_drive();
        drive.fail_listing(&ids.dir_a, FailureKind::Forbidden);
        let mut session = Session::start(&drive, &SessionOptions::default()).unwrap();

        let mut out = Vec::new();
        let err = session.execute("ls dirA", &mut out).unwrap_err();
        assert!(matches!(err, SessionError::Auth(_)));

        let err = run_interactive_session(
            &drive,
            &SessionOptions::default(),
            &b"cd dirA\nselect\n"[..],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::Auth(_)));
    }

    #[test]
    fn root_listing_failure_prevents_the_session_from_starting() {
        let (mut drive, _) = sample_drive();
        drive.fail_listing(ROOT_ID, FailureKind::Forbidden);
        assert!(matches!(
            Session::start(&drive, &SessionOptions::default()),
            Err(SessionError::Auth(_))
        ));

        drive.fail_listing(ROOT_ID, FailureKind::Unavailable);
        assert!(matches!(
            Session::start(&drive, &SessionOptions::default()),
            Err(SessionError::Remote(RemoteError::Transient(_)))
        ));
    }

    #[test]
    fn resolve_and_snapshot_skips_the_command_loop() {
        let (drive, _) = sample_drive();

        let selection =
            resolve_and_snapshot(&drive, &SessionOptions::default(), "~/dirA").unwrap();
        assert_eq!(selection.chosen_path, "~/dirA");
        assert_eq!(selection.files.len(), 2);

        let err = resolve_and_snapshot(&drive, &SessionOptions::default(), "~/nope").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Resolve(ResolveError::NotFound(ref name)) if name == "nope"
        ));
    }

    #[test]
    fn scratch_mirror_is_removed_after_the_session() {
        let parent = tempfile::tempdir().unwrap();
        let (drive, _) = sample_drive();
        let options = SessionOptions {
            scratch_dir: Some(parent.path().to_path_buf()),
            ..SessionOptions::default()
        };

        let mut session = Session::start(&drive, &options).unwrap();
        let scratch = session.mirror().scratch_path().unwrap().to_path_buf();
        exec(&mut session, "cd dirA");
        assert!(scratch.join("dirA").join("file1").is_file());
        assert!(scratch.join("dirA").join("dirB").is_dir());

        let picked = session.run(&b"select\n"[..], Vec::new()).unwrap();
        assert_eq!(picked.unwrap().files.len(), 2);
        assert!(!scratch.exists());
        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn scratch_mirror_is_removed_when_the_session_fails() {
        let parent = tempfile::tempdir().unwrap();
        let (mut drive, ids) = sample_drive();
        drive.fail_listing(&ids.dir_a, FailureKind::Forbidden);
        let options = SessionOptions {
            scratch_dir: Some(parent.path().to_path_buf()),
            ..SessionOptions::default()
        };

        let session = Session::start(&drive, &options).unwrap();
        let scratch = session.mirror().scratch_path().unwrap().to_path_buf();
        assert!(scratch.join("notes.txt").is_file());

        let err = session.run(&b"cd dirA\nselect\n"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, SessionError::Auth(_)));
        assert!(!scratch.exists());
        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
    }
