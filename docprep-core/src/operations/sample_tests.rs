//! Tests for random sampling

#[cfg(test)]
mod tests {
    use crate::operations::sample::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_source(count: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for i in 0..count {
            fs::write(dir.path().join(format!("doc_{i:03}.pdf")), format!("{i}")).unwrap();
        }
        dir
    }

    fn names_in(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_sample_subset() {
        let src = create_source(20);
        let dest = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let copied = sample_files(src.path(), dest.path(), 5, &mut rng).unwrap();

        assert_eq!(copied.len(), 5);
        let unique: BTreeSet<String> = copied.iter().cloned().collect();
        assert_eq!(unique.len(), 5);
        assert_eq!(names_in(dest.path()), unique);
        assert_eq!(names_in(src.path()).len(), 20);
    }

    #[test]
    fn test_sample_zero() {
        let src = create_source(4);
        let dest = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let copied = sample_files(src.path(), dest.path(), 0, &mut rng).unwrap();

        assert!(copied.is_empty());
        assert!(names_in(dest.path()).is_empty());
    }

    #[test]
    fn test_sample_more_than_available() {
        let src = create_source(3);
        let dest = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let copied = sample_files(src.path(), dest.path(), 10, &mut rng).unwrap();

        let copied: BTreeSet<String> = copied.into_iter().collect();
        assert_eq!(copied, names_in(src.path()));
        assert_eq!(names_in(dest.path()), names_in(src.path()));
    }

    #[test]
    fn test_same_seed_same_sample() {
        let src = create_source(30);
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();

        let a = sample_files(src.path(), first.path(), 8, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sample_files(src.path(), second.path(), 8, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_creates_destination() {
        let src = create_source(2);
        let dest = TempDir::new().unwrap();
        let nested = dest.path().join("sampled");

        sample_files(src.path(), &nested, 1, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(names_in(&nested).len(), 1);
    }

    #[test]
    fn test_missing_source_is_error() {
        let dest = TempDir::new().unwrap();
        let result = sample_files(
            &dest.path().join("missing"),
            dest.path(),
            1,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(result.is_err());
    }
}
