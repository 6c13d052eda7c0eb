use ctx_fs::{NormalizedPath, ProjectRoot};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));

        // Only a UNC prefix may carry a double slash
        if path.is_network_path() {
            prop_assert!(!as_str[2..].contains("//"));
        } else {
            prop_assert!(!as_str.contains("//"));
        }

        // Normalizing twice changes nothing
        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_join_properties(a in "\\PC*", b in "\\PC*") {
        let p1 = NormalizedPath::new(&a);
        let joined = p1.join(&b);

        prop_assert!(!joined.as_str().contains('\\'));

        if b.is_empty() || b == "." {
            prop_assert_eq!(joined, p1);
        }
    }

    #[test]
    fn test_rooted_paths_stay_under_root(include in "[a-z]{1,8}(/[a-z]{1,8}){0,4}") {
        let root = ProjectRoot::new("/repo").unwrap();
        let full = root.make_rooted(&include);
        prop_assert!(full.is_rooted());
        prop_assert!(full.as_str().starts_with("/repo/"));
    }
}
