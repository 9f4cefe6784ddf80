use magic_output_core::{Category, LineStream, Span};

#[test]
fn test_char_by_char_streaming() {
    let input = "Build started...\n  main.c:4: error: expected ';'\nBuild FAILED.\n";
    let mut stream = LineStream::default();
    let mut events = Vec::new();

    // Feed one character at a time
    for c in input.chars() {
        let mut buf = [0; 4];
        let s = c.encode_utf8(&mut buf);
        events.extend(stream.update(s));
    }
    events.extend(stream.finish());

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].category, None);
    assert_eq!(events[1].category, Some(Category::Error));
    assert_eq!(events[2].category, Some(Category::Error));
    assert_eq!(events, LineStream::default().classify_text(input));
}

#[test]
fn test_partial_line_held_back() {
    let mut stream = LineStream::default();
    assert!(stream.update("compilation comp").is_empty());
    assert_eq!(stream.offset(), 0);

    let events = stream.update("leted\nnext");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, Some(Category::Success));
    assert_eq!(events[0].span, Span::new(0, 21));
    assert_eq!(stream.offset(), 22);

    let tail = stream.finish();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].line, 1);
    assert_eq!(tail[0].span, Span::new(22, 26));
    assert_eq!(tail[0].category, None);
}

#[test]
fn test_absolute_trigger_offsets() {
    let events = LineStream::default().classify_text("ok\nwarning: unused\n");
    assert_eq!(events[1].span, Span::new(3, 18));
    assert_eq!(events[1].trigger, Some(Span::new(3, 10)));
}

#[test]
fn test_blank_lines_kept() {
    let events = LineStream::default().classify_text("\n\nerror\n");
    let lines: Vec<_> = events.iter().map(|e| (e.line, e.category)).collect();
    assert_eq!(lines, [(0, None), (1, None), (2, Some(Category::Error))]);
}

#[test]
fn test_multibyte_text() {
    let events = LineStream::default().classify_text("✔ Übersetzung done\n✖ Fehler: failed\n");
    assert_eq!(events[0].category, Some(Category::Success));
    assert_eq!(events[1].category, Some(Category::Error));
    assert_eq!(events[1].span.start, "✔ Übersetzung done\n".len());
}

#[test]
fn test_events_serialize() {
    let events = LineStream::default().classify_text("fatal: not a git repository\nplain\n");
    let json = serde_json::to_value(&events).unwrap();
    assert_eq!(json[0]["category"], "error");
    assert_eq!(json[0]["trigger"]["start"], 0);
    assert!(json[1].get("category").is_none());
}
