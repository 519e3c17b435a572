use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_with_sales, mh_db, setup_test_db, temp_out};

#[test]
fn test_export_csv_has_one_row_per_action() {
    let db_path = setup_test_db("export_csv");
    init_with_sales(&db_path);
    let out = temp_out("export_csv", "csv");

    mh_db(&db_path, &["export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("indicator_id,indicator,unit"));
    assert!(content.contains("Close deal A"));
    assert!(content.contains("Close deal B"));
}

#[test]
fn test_export_json_is_parseable() {
    let db_path = setup_test_db("export_json");
    init_with_sales(&db_path);
    let out = temp_out("export_json", "json");

    mh_db(&db_path, &["export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["indicator"], "Sales");
    assert_eq!(rows[0]["current_value"], 100000.0);
}

#[test]
fn test_export_refuses_existing_file_without_force() {
    let db_path = setup_test_db("export_exists");
    init_with_sales(&db_path);
    let out = temp_out("export_exists", "csv");
    fs::write(&out, "keep me").unwrap();

    mh_db(&db_path, &["export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    mh_db(&db_path, &["export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Sales"));
}

#[test]
fn test_backup_copies_and_compresses() {
    let db_path = setup_test_db("backup_zip");
    init_with_sales(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    mh_db(&db_path, &["backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let zipped = temp_out("backup_zip", "sqlite");
    let zip_path = Path::new(&zipped).with_extension("zip");
    fs::remove_file(&zip_path).ok();

    mh_db(&db_path, &["backup", "--file", &zipped, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(zip_path.exists());
    assert!(!Path::new(&zipped).exists());
}

#[test]
fn test_backup_into_zip_named_file_keeps_archive() {
    let db_path = setup_test_db("backup_same_name");
    init_with_sales(&db_path);

    let target = temp_out("backup_same_name", "zip");
    let staging = Path::new(&target).with_extension("sqlite.tmp");
    let db_len = fs::metadata(&db_path).unwrap().len();

    mh_db(&db_path, &["backup", "--file", &target, "--compress", "zip"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(Path::new(&target).exists(), "archive must survive");
    assert!(!staging.exists());

    let mut archive = zip::ZipArchive::new(fs::File::open(&target).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);
    let entry = archive.by_index(0).unwrap();
    assert_eq!(entry.size(), db_len);
}

#[test]
fn test_backup_tar_gz_holds_database_copy() {
    let db_path = setup_test_db("backup_tar");
    init_with_sales(&db_path);

    let plain = temp_out("backup_tar", "sqlite");
    let tar_path = Path::new(&plain).with_extension("tar.gz");
    fs::remove_file(&tar_path).ok();
    let db_len = fs::metadata(&db_path).unwrap().len();

    mh_db(&db_path, &["backup", "--file", &plain, "--compress", "tar-gz"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(tar_path.exists());
    assert!(!Path::new(&plain).exists());

    let decoder = flate2::read::GzDecoder::new(fs::File::open(&tar_path).unwrap());
    let mut archive = tar::Archive::new(decoder);
    let sizes: Vec<u64> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().header().size().unwrap())
        .collect();
    assert_eq!(sizes, [db_len]);
}
