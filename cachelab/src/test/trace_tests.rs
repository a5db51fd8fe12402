use crate::trace::{AccessKind, AccessRecord};

#[test]
fn parses_each_op() {
    assert_eq!(AccessRecord::parse(" L 10,1"), Some(AccessRecord::new(AccessKind::Load, 0x10, 1)));
    assert_eq!(AccessRecord::parse(" S 18,4"), Some(AccessRecord::new(AccessKind::Store, 0x18, 4)));
    assert_eq!(AccessRecord::parse(" M 0421c7f0,4"), Some(AccessRecord::new(AccessKind::Modify, 0x0421c7f0, 4)));
    assert_eq!(AccessRecord::parse("I 0400d7d4,8"), Some(AccessRecord::new(AccessKind::Instruction, 0x0400d7d4, 8)));
}

#[test]
fn accepts_scanf_style_spacing() {
    let expected = Some(AccessRecord::new(AccessKind::Load, 0x7ff000388, 8));
    assert_eq!(AccessRecord::parse("L 7ff000388,8"), expected);
    assert_eq!(AccessRecord::parse("\t  L   7ff000388,8\n"), expected);
    assert_eq!(AccessRecord::parse(" L7ff000388,8"), expected);
    assert_eq!(AccessRecord::parse(" L 7ff000388, 8"), expected);
    assert_eq!(AccessRecord::parse(" L 7FF000388,8 trailing"), expected);
    assert_eq!(AccessRecord::parse(" L 0x7ff000388,8"), expected);
}

#[test]
fn rejects_malformed_lines() {
    for line in [
        "",
        "\n",
        "garbage text",
        " L",
        " L 10",
        " L 10;1",
        " L ,1",
        " L 10,",
        " L zz,1",
        " X 10,1",
        "Lx 10,1",
        " L 1ffffffffffffffff,1",
        " L 10,99999999999",
    ] {
        assert_eq!(AccessRecord::parse(line), None, "{line:?} should not parse");
    }
}

#[test]
fn access_counts() {
    assert_eq!(AccessKind::Instruction.access_count(), 0);
    assert_eq!(AccessKind::Load.access_count(), 1);
    assert_eq!(AccessKind::Store.access_count(), 1);
    assert_eq!(AccessKind::Modify.access_count(), 2);
}

#[test]
fn display_is_a_trace_line() {
    assert_eq!(AccessRecord::new(AccessKind::Load, 0x10_0000, 4).to_string(), " L 100000,4");
    assert_eq!(AccessRecord::new(AccessKind::Instruction, 0x400000, 5).to_string(), "I 400000,5");
    let record = AccessRecord::new(AccessKind::Modify, 0xdead_beef, 8);
    assert_eq!(AccessRecord::parse(&record.to_string()), Some(record));
}
