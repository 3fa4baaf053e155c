//! Move execution.
//!
//! Performs the confirmed filesystem moves in plan order. Each item first
//! gets its destination category directory created if absent (mode 0755),
//! then the source file is renamed into place. A failure at either step
//! logs an error, pushes the item's original index line back into the
//! retained set, bumps the error counter, and continues with the next item;
//! nothing is rolled back.

use crate::output::OutputFormatter;
use crate::plan::PlanItem;
use std::fs;
use std::io;
use std::path::Path;

/// Counters reported in the end-of-run summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveOutcome {
    pub moved: usize,
    pub errors: usize,
}

/// Moves every planned item, falling failed items back into `retained`.
pub fn execute_moves(
    items: &[PlanItem],
    retained: &mut Vec<String>,
    out: &OutputFormatter,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    let pb = OutputFormatter::create_progress_bar(items.len() as u64);

    for item in items {
        if let Err(e) = ensure_dest_dir(&item.dest_dir) {
            out.error(&format!(
                "Cannot create {} directory ({})",
                item.dest_dir.display(),
                e
            ));
            retained.push(item.raw_line.clone());
            outcome.errors += 1;
            pb.inc(1);
            continue;
        }

        match fs::rename(&item.cache_path, &item.dest_path) {
            Ok(()) => {
                out.debug(&format!(
                    "{} moved to {}",
                    item.cache_name,
                    item.dest_path.display()
                ));
                outcome.moved += 1;
            }
            Err(e) => {
                out.error(&format!(
                    "Cannot move {} to {} ({})",
                    item.cache_name,
                    item.dest_path.display(),
                    e
                ));
                retained.push(item.raw_line.clone());
                outcome.errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    outcome
}

/// Creates the destination directory with owner rwx, group/other rx.
fn ensure_dest_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_plan;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEX_A: &str = "AABBCCDDEEFF00112233445566778899";

    fn quiet() -> OutputFormatter {
        OutputFormatter::new(false)
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let cache_dir = temp.path().join("Cache");
        let target_dir = temp.path().join("ut2004");
        fs::create_dir(&cache_dir).unwrap();
        fs::create_dir(&target_dir).unwrap();
        (temp, cache_dir, target_dir)
    }

    #[test]
    fn test_move_creates_category_directory() {
        let (_temp, cache_dir, target_dir) = setup();
        fs::write(cache_dir.join(format!("{HEX_A}-7.uxx")), b"texture data").unwrap();
        let index = format!("{HEX_A}-7=Foo.utx\n");
        let plan = build_plan(&index, &cache_dir, &target_dir, &quiet());

        let mut retained = plan.retained;
        let outcome = execute_moves(&plan.items, &mut retained, &quiet());

        assert_eq!(outcome.moved, 1);
        assert_eq!(outcome.errors, 0);
        assert!(retained.is_empty());
        assert!(target_dir.join("Textures").is_dir());
        assert!(target_dir.join("Textures").join("Foo.utx").is_file());
        assert!(!cache_dir.join(format!("{HEX_A}-7.uxx")).exists());
    }

    #[test]
    fn test_move_into_existing_directory() {
        let (_temp, cache_dir, target_dir) = setup();
        fs::create_dir(target_dir.join("System")).unwrap();
        fs::write(cache_dir.join(format!("{HEX_A}-3.uxx")), b"code").unwrap();
        let index = format!("{HEX_A}-3=XGame.u\n");
        let plan = build_plan(&index, &cache_dir, &target_dir, &quiet());

        let mut retained = plan.retained;
        let outcome = execute_moves(&plan.items, &mut retained, &quiet());

        assert_eq!(outcome.moved, 1);
        assert!(target_dir.join("System").join("XGame.u").is_file());
    }

    #[test]
    fn test_directory_create_failure_retains_line() {
        let (_temp, cache_dir, target_dir) = setup();
        fs::write(cache_dir.join(format!("{HEX_A}-7.uxx")), b"data").unwrap();
        // A plain file where the category directory should go.
        fs::write(target_dir.join("Textures"), b"in the way").unwrap();

        let index = format!("{HEX_A}-7=Foo.utx\n");
        let plan = build_plan(&index, &cache_dir, &target_dir, &quiet());
        assert_eq!(plan.items.len(), 1);

        let mut retained = plan.retained;
        let outcome = execute_moves(&plan.items, &mut retained, &quiet());

        assert_eq!(outcome.moved, 0);
        assert_eq!(outcome.errors, 1);
        assert_eq!(retained, vec![index]);
        assert!(cache_dir.join(format!("{HEX_A}-7.uxx")).is_file());
    }

    #[test]
    fn test_failed_move_does_not_stop_later_items() {
        let (_temp, cache_dir, target_dir) = setup();
        const HEX_B: &str = "00112233445566778899AABBCCDDEEFF";
        fs::write(cache_dir.join(format!("{HEX_A}-7.uxx")), b"one").unwrap();
        fs::write(cache_dir.join(format!("{HEX_B}-8.uxx")), b"two").unwrap();
        // Block only the Textures directory.
        fs::write(target_dir.join("Textures"), b"in the way").unwrap();

        let index = format!("{HEX_A}-7=Foo.utx\n{HEX_B}-8=Song.ogg\n");
        let plan = build_plan(&index, &cache_dir, &target_dir, &quiet());
        assert_eq!(plan.items.len(), 2);

        let mut retained = plan.retained;
        let outcome = execute_moves(&plan.items, &mut retained, &quiet());

        assert_eq!(outcome.moved, 1);
        assert_eq!(outcome.errors, 1);
        assert_eq!(retained, vec![format!("{HEX_A}-7=Foo.utx\n")]);
        assert!(target_dir.join("Music").join("Song.ogg").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_created_directory_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, cache_dir, target_dir) = setup();
        fs::write(cache_dir.join(format!("{HEX_A}-1.uxx")), b"map").unwrap();
        let index = format!("{HEX_A}-1=DM-Test.ut2\n");
        let plan = build_plan(&index, &cache_dir, &target_dir, &quiet());

        let mut retained = plan.retained;
        execute_moves(&plan.items, &mut retained, &quiet());

        let mode = fs::metadata(target_dir.join("Maps"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
