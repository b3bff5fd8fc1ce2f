use crate::types::Error;
use crate::types::Result;
use crate::Loopback;
use crate::Message;
use crate::Transport;
use crate::TransportError;

type R<T> = Result<T>;

// ==== MESSAGE CELLS ====

#[test]
fn test_word_cell() -> R<()> {
    let mut msg = Message::new("test");
    msg.set_word("0", 0xDEADBEEF);
    assert_eq!(msg.get_word("0")?, 0xDEADBEEF);
    Ok(())
}

#[test]
fn test_word_array_cell() -> R<()> {
    let mut msg = Message::new("test");
    msg.set_word_array("0", vec![1, 2, 3]);
    assert_eq!(msg.get_word_array("0")?, &[1, 2, 3]);
    Ok(())
}

#[test]
fn test_string_cell() -> R<()> {
    let mut msg = Message::new("test");
    msg.set_string("0", "hello");
    assert_eq!(msg.get_string("0")?, "hello");
    Ok(())
}

#[test]
fn test_string_array_cell() -> R<()> {
    let mut msg = Message::new("test");
    msg.set_string_array("0", vec!["a".to_string(), "b".to_string()]);
    assert_eq!(msg.get_string_array("0")?, &["a".to_string(), "b".to_string()]);
    Ok(())
}

#[test]
fn test_binary_cell() -> R<()> {
    let mut msg = Message::new("test");
    msg.set_binary("0", vec![0xCA, 0xFE]);
    assert_eq!(msg.get_binary("0", 2)?, &[0xCA, 0xFE]);
    Ok(())
}

#[test]
fn test_setters_overwrite() -> R<()> {
    let mut msg = Message::new("test");
    msg.set_word("0", 1);
    msg.set_string("0", "now a string");
    assert_eq!(msg.get_string("0")?, "now a string");
    assert_eq!(msg.len(), 1);
    Ok(())
}

#[test]
fn test_name_and_keys() {
    let mut msg = Message::new("v1.Something");
    assert_eq!(msg.name(), "v1.Something");
    assert!(msg.is_empty());

    msg.set_word("0", 1);
    msg.set_word("1", 2);
    assert!(msg.key_exists("0"));
    assert!(!msg.key_exists("2"));
    assert_eq!(msg.keys().collect::<Vec<_>>(), vec!["0", "1"]);
}

// ==== MESSAGE ERRORS ====

#[test]
fn test_bad_key() {
    let msg = Message::new("test");
    match msg.get_word("missing") {
        Err(Error::BadKey(key)) => assert_eq!(key, "missing"),
        _ => panic!("Expected BadKey"),
    }
}

#[test]
fn test_wrong_type() {
    let mut msg = Message::new("test");
    msg.set_string("0", "not a word");
    match msg.get_word("0") {
        Err(Error::WrongType(key)) => assert_eq!(key, "0"),
        _ => panic!("Expected WrongType"),
    }
}

#[test]
fn test_binary_length_mismatch() {
    let mut msg = Message::new("test");
    msg.set_binary("0", vec![1, 2, 3]);
    match msg.get_binary("0", 8) {
        Err(Error::BufferTooSmall {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 8);
            assert_eq!(actual, 3);
        }
        _ => panic!("Expected BufferTooSmall"),
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::BadKey("7".to_string()).to_string(),
        "bad RPC key: 7"
    );
    assert_eq!(Error::WrongType("7".to_string()).to_string(), "RPC type error");
    assert_eq!(
        Error::BufferTooSmall {
            key: "7".to_string(),
            expected: 8,
            actual: 3,
        }
        .to_string(),
        "buffer too small"
    );
    assert_eq!(
        Error::Corrupt("truncated".to_string()).to_string(),
        "corrupt RPC message: truncated"
    );
}

// ==== LOOPBACK TRANSPORT ====

#[test]
fn test_loopback_call() {
    let mut transport = Loopback::new(|request: &Message| {
        let mut response = Message::new(request.name());
        response.set_word("0", request.get_word("0").unwrap() + 1);
        response
    });

    transport.connect("gem-shelf01").unwrap();

    let mut request = Message::new("v1.Increment");
    request.set_word("0", 41);
    let response = transport.call_method(&request).unwrap();
    assert_eq!(response.get_word("0").unwrap(), 42);
}

#[test]
fn test_loopback_requires_connection() {
    let mut transport = Loopback::new(|request: &Message| Message::new(request.name()));

    match transport.call_method(&Message::new("v1.Ping")) {
        Err(TransportError::NotConnected) => {}
        _ => panic!("Expected NotConnected"),
    }
    match transport.disconnect() {
        Err(TransportError::NotConnected) => {}
        _ => panic!("Expected NotConnected"),
    }
}

#[test]
fn test_loopback_refusing() {
    let mut transport = Loopback::refusing(|request: &Message| Message::new(request.name()));
    match transport.connect("gem-shelf01") {
        Err(TransportError::ConnectionRefused(_)) => {}
        _ => panic!("Expected ConnectionRefused"),
    }
}

#[test]
fn test_loopback_load_module() {
    let mut transport = Loopback::new(|request: &Message| Message::new(request.name()));
    transport.connect("gem-shelf01").unwrap();
    assert!(transport.load_module("memory", "v1.0.1").unwrap());
    transport.disconnect().unwrap();
}
