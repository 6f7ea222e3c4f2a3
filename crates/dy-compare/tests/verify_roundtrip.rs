use rusqlite::Connection;

use dy_compare::verify_area;
use dy_core::parse::parse_area_text;
use dy_db::write_area_db;

const FIXTURE: &str = "\
#AREADATA
Name #RThe Proving Grounds#n~
VNUMs 1000 1099
Builders Siva~
Security 7
Recall 1000
Flags 0
End

#MOBILES
#1000
grizzled veteran~
a grizzled veteran~
A grizzled veteran leans on his spear.
~
Scars cross his face.
~
8 128 -350 S
500 50 -400 10d10+5000 4d6+20
120000 0 0
1
#0

#OBJECTS
#1050
spear veteran~
the veteran's spear~
A spear rests against the wall.~
~
5 64 8193
8037 10 30 3
12 150000 50
A
18 15
A
19 12
Q
Your spear hums.~
The hum fades.~
~
#RThe spear glows.#n~
~
~
3 45
#0

#ROOMDATA
#1000
Training Hall~
Sand covers the floor.
~
0 16385 0
D0
Through the archway.
~
archway~
1 2050 1001
E
sand~
Coarse and dry.
~
S
#1001
Armory~
Racks of weapons.
~
0 0 0
D2
~
~
0 -1 1000
S
#0

#RESETS
M 1000 1 1000
G 1050 0 0
E 1050 0 16
O 1050 0 1001
P 1050 0 1050
S

#SHOPS
1000 5 9 0 0 0 120 90 0 23
0

#SPECIALS
M 1000 spec_cast_adept
S

#$
";

fn fixture_area() -> dy_core::Area {
    let mut area = parse_area_text(FIXTURE).unwrap();
    area.file_name = "proving".to_string();
    area
}

#[test]
fn clean_projection_verifies_with_no_mismatches() {
    let area = fixture_area();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("proving.db");
    write_area_db(&area, &db_path).unwrap();

    let report = verify_area(&area, &db_path, None).unwrap();
    assert!(report.passed(), "unexpected mismatches: {:#?}", report.mismatches);
}

#[test]
fn tampered_level_yields_exactly_one_mismatch() {
    let area = fixture_area();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("proving.db");
    write_area_db(&area, &db_path).unwrap();

    Connection::open(&db_path)
        .unwrap()
        .execute("UPDATE mobiles SET level = 501 WHERE vnum = 1000", [])
        .unwrap();

    let report = verify_area(&area, &db_path, None).unwrap();
    assert_eq!(report.mismatches.len(), 1);
    let m = &report.mismatches[0];
    assert_eq!(m.entity, "mobile");
    assert_eq!(m.key, "1000");
    assert_eq!(m.field, "level");
    assert_eq!(m.expected, "500");
    assert_eq!(m.actual, "501");
}

#[test]
fn tampered_color_code_string_is_detected() {
    let area = fixture_area();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("proving.db");
    write_area_db(&area, &db_path).unwrap();

    // Stripping the color escape must count as drift.
    Connection::open(&db_path)
        .unwrap()
        .execute(
            "UPDATE objects SET victpoweron = 'The spear glows.' WHERE vnum = 1050",
            [],
        )
        .unwrap();

    let report = verify_area(&area, &db_path, None).unwrap();
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].field, "victpoweron");
    assert_eq!(report.mismatches[0].expected, "#RThe spear glows.#n");
}

#[test]
fn reordered_resets_are_detected() {
    let area = fixture_area();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("proving.db");
    write_area_db(&area, &db_path).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    conn.execute("UPDATE resets SET sort_order = 99 WHERE sort_order = 0", [])
        .unwrap();

    let report = verify_area(&area, &db_path, None).unwrap();
    assert!(!report.passed());
    assert!(report.mismatches.iter().all(|m| m.entity == "reset"));
}

#[test]
fn dropped_reverse_exit_is_detected() {
    let area = fixture_area();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("proving.db");
    write_area_db(&area, &db_path).unwrap();

    Connection::open(&db_path)
        .unwrap()
        .execute("DELETE FROM exits WHERE room_vnum = 1001", [])
        .unwrap();

    let report = verify_area(&area, &db_path, None).unwrap();
    assert!(report
        .mismatches
        .iter()
        .any(|m| m.entity == "exit" && m.field == "reverse_exit" && m.key == "1000/north"));
}

#[test]
fn bitmask_round_trips_unchanged() {
    let area = fixture_area();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("proving.db");
    write_area_db(&area, &db_path).unwrap();

    let flags: i64 = Connection::open(&db_path)
        .unwrap()
        .query_row("SELECT room_flags FROM rooms WHERE vnum = 1000", [], |row| row.get(0))
        .unwrap();
    assert_eq!(flags, 16385);
}
