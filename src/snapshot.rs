use crate::error::SsitError;
use crate::pipeline::ScanTable;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Bumped whenever the encoded layout of `ScanTable` changes.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

pub fn snapshot_filename() -> &'static str {
    "ssit_table.bin"
}

/// Save a finished table with bincode, preceded by the format version.
pub fn save<P: AsRef<Path>>(table: &ScanTable, path: P) -> Result<(), SsitError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let config = bincode::config::standard();
    bincode::encode_into_std_write(SNAPSHOT_FORMAT_VERSION, &mut writer, config)?;
    bincode::encode_into_std_write(table, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Load a table saved by [`save`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<ScanTable, SsitError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let config = bincode::config::standard();
    let format_version: u32 = bincode::decode_from_std_read(&mut reader, config)?;
    if format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(SsitError::Other(format!(
            "snapshot format version {} is not supported (expected {})",
            format_version, SNAPSHOT_FORMAT_VERSION
        )));
    }
    let table: ScanTable = bincode::decode_from_std_read(&mut reader, config)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::pipeline::run_scan;
    use std::env;
    use std::path::PathBuf;

    fn temp_path_for_test(test_name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("ssit_snapshot_test_{}.bin", test_name));
        path
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path_for_test("save_and_load");
        let table = run_scan(&ScanConfig::with_n_max(300)).unwrap();

        save(&table, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, table);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path_for_test("missing");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(load(&path), Err(SsitError::Io(_))));
    }

    #[test]
    fn test_load_garbage_fails() {
        let path = temp_path_for_test("garbage");
        std::fs::write(&path, b"not a snapshot").unwrap();
        assert!(load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
