//! Fixed schema scripts. Column sets and names are part of the external
//! contract; the verifier compares against them field by field. Every
//! integer column is `NOT NULL DEFAULT 0` and every text column is
//! `NOT NULL DEFAULT ''` unless the table defines a different default.

/// Per-area database. One file per source area file, named by its stem.
pub const AREA_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS area (
    name        TEXT NOT NULL DEFAULT '',
    builders    TEXT NOT NULL DEFAULT '',
    lvnum       INTEGER NOT NULL DEFAULT 0,
    uvnum       INTEGER NOT NULL DEFAULT 0,
    security    INTEGER NOT NULL DEFAULT 0,
    recall      INTEGER NOT NULL DEFAULT 0,
    area_flags  INTEGER NOT NULL DEFAULT 0,
    is_hidden   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS mobiles (
    vnum        INTEGER PRIMARY KEY,
    player_name TEXT NOT NULL DEFAULT '',
    short_descr TEXT NOT NULL DEFAULT '',
    long_descr  TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    act         INTEGER NOT NULL DEFAULT 0,
    affected_by INTEGER NOT NULL DEFAULT 0,
    alignment   INTEGER NOT NULL DEFAULT 0,
    level       INTEGER NOT NULL DEFAULT 0,
    hitroll     INTEGER NOT NULL DEFAULT 0,
    ac          INTEGER NOT NULL DEFAULT 0,
    hitnodice   INTEGER NOT NULL DEFAULT 0,
    hitsizedice INTEGER NOT NULL DEFAULT 0,
    hitplus     INTEGER NOT NULL DEFAULT 0,
    damnodice   INTEGER NOT NULL DEFAULT 0,
    damsizedice INTEGER NOT NULL DEFAULT 0,
    damplus     INTEGER NOT NULL DEFAULT 0,
    gold        INTEGER NOT NULL DEFAULT 0,
    sex         INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS objects (
    vnum        INTEGER PRIMARY KEY,
    name         TEXT NOT NULL DEFAULT '',
    short_descr  TEXT NOT NULL DEFAULT '',
    description  TEXT NOT NULL DEFAULT '',
    item_type    INTEGER NOT NULL DEFAULT 0,
    extra_flags  INTEGER NOT NULL DEFAULT 0,
    wear_flags   INTEGER NOT NULL DEFAULT 0,
    value0       INTEGER NOT NULL DEFAULT 0,
    value1       INTEGER NOT NULL DEFAULT 0,
    value2       INTEGER NOT NULL DEFAULT 0,
    value3       INTEGER NOT NULL DEFAULT 0,
    weight       INTEGER NOT NULL DEFAULT 0,
    cost         INTEGER NOT NULL DEFAULT 0,
    chpoweron    TEXT NOT NULL DEFAULT '',
    chpoweroff   TEXT NOT NULL DEFAULT '',
    chpoweruse   TEXT NOT NULL DEFAULT '',
    victpoweron  TEXT NOT NULL DEFAULT '',
    victpoweroff TEXT NOT NULL DEFAULT '',
    victpoweruse TEXT NOT NULL DEFAULT '',
    spectype     INTEGER NOT NULL DEFAULT 0,
    specpower    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS object_affects (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    obj_vnum   INTEGER NOT NULL REFERENCES objects(vnum),
    location   INTEGER NOT NULL DEFAULT 0,
    modifier   INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS extra_descriptions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_type  TEXT NOT NULL DEFAULT '',
    owner_vnum  INTEGER NOT NULL DEFAULT 0,
    keyword     TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    sort_order  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS rooms (
    vnum        INTEGER PRIMARY KEY,
    name        TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    room_flags  INTEGER NOT NULL DEFAULT 0,
    sector_type INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS exits (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    room_vnum   INTEGER NOT NULL REFERENCES rooms(vnum),
    direction   INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    keyword     TEXT NOT NULL DEFAULT '',
    exit_info   INTEGER NOT NULL DEFAULT 0,
    key_vnum    INTEGER NOT NULL DEFAULT -1,
    to_vnum     INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS room_texts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    room_vnum  INTEGER NOT NULL REFERENCES rooms(vnum),
    input      TEXT NOT NULL DEFAULT '',
    output     TEXT NOT NULL DEFAULT '',
    choutput   TEXT NOT NULL DEFAULT '',
    name       TEXT NOT NULL DEFAULT '',
    type       INTEGER NOT NULL DEFAULT 0,
    power      INTEGER NOT NULL DEFAULT 0,
    mob        INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS resets (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    command    TEXT NOT NULL DEFAULT '',
    arg1       INTEGER NOT NULL DEFAULT 0,
    arg2       INTEGER NOT NULL DEFAULT 0,
    arg3       INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS shops (
    keeper_vnum INTEGER PRIMARY KEY,
    buy_type0   INTEGER NOT NULL DEFAULT 0,
    buy_type1   INTEGER NOT NULL DEFAULT 0,
    buy_type2   INTEGER NOT NULL DEFAULT 0,
    buy_type3   INTEGER NOT NULL DEFAULT 0,
    buy_type4   INTEGER NOT NULL DEFAULT 0,
    profit_buy  INTEGER NOT NULL DEFAULT 0,
    profit_sell INTEGER NOT NULL DEFAULT 0,
    open_hour   INTEGER NOT NULL DEFAULT 0,
    close_hour  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS specials (
    mob_vnum      INTEGER PRIMARY KEY,
    spec_fun_name TEXT NOT NULL DEFAULT ''
);
";

/// Shared game database: helps plus every game-wide register.
pub const GAME_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS helps (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    level   INTEGER NOT NULL DEFAULT 0,
    keyword TEXT NOT NULL DEFAULT '',
    text    TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS notes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    board_idx  INTEGER NOT NULL DEFAULT 0,
    sender     TEXT NOT NULL DEFAULT '',
    date       TEXT NOT NULL DEFAULT '',
    date_stamp INTEGER NOT NULL DEFAULT 0,
    expire     INTEGER NOT NULL DEFAULT 0,
    to_list    TEXT NOT NULL DEFAULT '',
    subject    TEXT NOT NULL DEFAULT '',
    text       TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS bugs (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    room_vnum INTEGER NOT NULL DEFAULT 0,
    player    TEXT NOT NULL DEFAULT '',
    message   TEXT NOT NULL DEFAULT '',
    timestamp INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS bans (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT NOT NULL DEFAULT '',
    reason TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS disabled_commands (
    command_name TEXT PRIMARY KEY,
    level        INTEGER NOT NULL DEFAULT 0,
    disabled_by  TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS gameconfig (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS topboard (
    rank    INTEGER PRIMARY KEY,
    name    TEXT NOT NULL DEFAULT 'Empty',
    pkscore INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS leaderboard (
    category TEXT PRIMARY KEY,
    name     TEXT NOT NULL DEFAULT 'Nobody',
    value    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS kingdoms (
    id       INTEGER PRIMARY KEY,
    name     TEXT NOT NULL DEFAULT 'None',
    whoname  TEXT NOT NULL DEFAULT 'None',
    leader   TEXT NOT NULL DEFAULT 'None',
    general  TEXT NOT NULL DEFAULT 'None',
    kills    INTEGER NOT NULL DEFAULT 0,
    deaths   INTEGER NOT NULL DEFAULT 0,
    qps      INTEGER NOT NULL DEFAULT 0,
    req_hit  INTEGER NOT NULL DEFAULT 0,
    req_move INTEGER NOT NULL DEFAULT 0,
    req_mana INTEGER NOT NULL DEFAULT 0,
    req_qps  INTEGER NOT NULL DEFAULT 0
);
";

/// Per-player database. Generic key tables: every field is stored under
/// its save-file key so that unknown-to-us fields still round-trip.
pub const PLAYER_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS player_strings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS player_ints (
    key   TEXT PRIMARY KEY,
    value INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_arrays (
    name TEXT PRIMARY KEY,
    data TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS skills (
    skill_name TEXT PRIMARY KEY,
    value      INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS aliases (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    short_n TEXT NOT NULL DEFAULT '',
    long_n  TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS affects (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    skill_name TEXT NOT NULL DEFAULT '',
    duration   INTEGER NOT NULL DEFAULT 0,
    modifier   INTEGER NOT NULL DEFAULT 0,
    location   INTEGER NOT NULL DEFAULT 0,
    bitvector  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS boards (
    board_name TEXT PRIMARY KEY,
    last_note  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_objects (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    sort_order INTEGER NOT NULL DEFAULT 0,
    value0     INTEGER NOT NULL DEFAULT 0,
    value1     INTEGER NOT NULL DEFAULT 0,
    value2     INTEGER NOT NULL DEFAULT 0,
    value3     INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_object_strings (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    obj_id     INTEGER NOT NULL REFERENCES player_objects(id),
    key        TEXT NOT NULL DEFAULT '',
    value      TEXT NOT NULL DEFAULT '',
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_object_ints (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    obj_id     INTEGER NOT NULL REFERENCES player_objects(id),
    key        TEXT NOT NULL DEFAULT '',
    value      INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_object_affects (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    obj_id     INTEGER NOT NULL REFERENCES player_objects(id),
    duration   INTEGER NOT NULL DEFAULT 0,
    modifier   INTEGER NOT NULL DEFAULT 0,
    location   INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_object_extra_descr (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    obj_id      INTEGER NOT NULL REFERENCES player_objects(id),
    keyword     TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    sort_order  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS player_object_spells (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    obj_id     INTEGER NOT NULL REFERENCES player_objects(id),
    slot       INTEGER NOT NULL DEFAULT 0,
    name       TEXT NOT NULL DEFAULT '',
    sort_order INTEGER NOT NULL DEFAULT 0
);
";
