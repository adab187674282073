//! Decoding of realistic node payloads into the domain model.
//!
//! Fixtures are shaped after mainnet responses; only the fields relevant to
//! each test are asserted exhaustively.

use chainweb3_types::{
    decode_block, decode_log, decode_logs, decode_receipt, decode_transaction, Address, Data,
    DecodeError, DecodeMode, Hash, Quantity,
};
use serde_json::{json, Value};

// ─── Fixtures ─────────────────────────────────────────────────────────────────

const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";
const BLOCK_HASH: &str = "0x1d59ff54b1eb26b013ce3cb5fc9dab3705b415a67127a003c3e61eb445bb8df2";
const FROM: &str = "0xa7d9ddbe1f17865597fbd27ec712455208b6b76d";
const TO: &str = "0xf02c1c8e6114b1dbe8937a39260b5b0a374432bb";

fn wire_transaction() -> Value {
    json!({
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "from": FROM,
        "gas": "0x5208",
        "gasPrice": "0x4a817c800",
        "hash": TX_HASH,
        "input": "0x68656c6c6f21",
        "nonce": "0x2a",
        "r": "0x1b5e176d927f8e9ab405058b2d2457392da3e20f328b16ddabcebc33eaac5fea",
        "s": "0x4ba69724e8f69de52f0125ad8b3c5c2cef33019bac3249e2c0a2192766d1721c",
        "to": TO,
        "transactionIndex": "0x41",
        "v": "0x25",
        "value": "0x0"
    })
}

fn wire_log(removed: bool) -> Value {
    json!({
        "address": "0xb59f67a8bff5d8cd03f6ac17265c550ed8f33907",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
        "logIndex": "0x0",
        "removed": removed,
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x000000000000000000000000a7d9ddbe1f17865597fbd27ec712455208b6b76d"
        ],
        "transactionHash": TX_HASH,
        "transactionIndex": "0x41"
    })
}

fn wire_block() -> Value {
    json!({
        "difficulty": "0x4ea3f27bc",
        "extraData": "0x476574682f4c5649562f76312e302e302f6c696e75782f676f312e342e32",
        "gasLimit": "0x1388",
        "gasUsed": "0x0",
        "hash": "0xdc0818cf78f21a8e70579cb46a43643f78291264dda342ae31049421c82d21ae",
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "miner": "0xbb7b8287f3f0a933474a79eae42cbca977791171",
        "mixHash": "0x4fffe9ae21f1c9e15207b1f472d5bbdd68c9595d461666602f2be20daf89bb62",
        "nonce": "0x689056015818adbe",
        "number": "0x1b4",
        "parentHash": "0xe99e022112df268087ea7eafaf4790497fd21dbeeb6bd7a1721df161a6657a54",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "size": "0x220",
        "stateRoot": "0xddc8b0234c2e0cad087c8b389aa7ef01f7d79b2570bccb77ce48648aa61c904d",
        "timestamp": "0x55ba467c",
        "totalDifficulty": "0x78ed983323d",
        "transactions": [],
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "uncles": []
    })
}

fn q(n: u64) -> Quantity {
    Quantity::from(n)
}

fn hash(s: &str) -> Hash {
    s.parse().unwrap()
}

// ─── Transactions ─────────────────────────────────────────────────────────────

#[test]
fn transaction_end_to_end() {
    let tx = decode_transaction(&wire_transaction(), DecodeMode::Strict).unwrap();

    assert_eq!(tx.gas, q(21_000));
    assert_eq!(tx.value, q(0));
    assert_eq!(tx.nonce, q(42));
    assert_eq!(tx.gas_price, q(20_000_000_000));
    assert_eq!(tx.block_number, q(6_139_707));
    assert_eq!(tx.transaction_index, q(65));

    assert_eq!(tx.hash, hash(TX_HASH));
    assert_eq!(tx.block_hash, hash(BLOCK_HASH));
    assert_eq!(tx.from, FROM.parse::<Address>().unwrap());
    assert_eq!(tx.to, TO.parse::<Address>().unwrap());
    assert_eq!(tx.input.as_bytes(), b"hello!");
    assert_eq!(tx.v.as_bytes(), &[0x25]);
    assert_eq!(tx.r.len(), 32);
    assert_eq!(tx.s.len(), 32);
}

#[test]
fn decimal_and_numeric_forms_are_accepted() {
    let mut wire = wire_transaction();
    wire["gas"] = json!("21000");
    wire["nonce"] = json!(42);
    wire["value"] = json!("1.0");

    let tx = decode_transaction(&wire, DecodeMode::Lenient).unwrap();
    assert_eq!(tx.gas, q(21_000));
    assert_eq!(tx.nonce, q(42));
    assert_eq!(tx.value, q(1));
}

#[test]
fn legacy_gasprice_spelling_is_accepted() {
    let mut wire = wire_transaction();
    let obj = wire.as_object_mut().unwrap();
    let price = obj.remove("gasPrice").unwrap();
    obj.insert("gasprice".into(), price);

    let tx = decode_transaction(&wire, DecodeMode::Strict).unwrap();
    assert_eq!(tx.gas_price, q(20_000_000_000));
}

#[test]
fn malformed_field_does_not_touch_siblings() {
    let mut wire = wire_transaction();
    wire["gasPrice"] = json!("0xnot-hex");

    let tx = decode_transaction(&wire, DecodeMode::Lenient).unwrap();
    assert_eq!(tx.gas_price, q(0));
    assert_eq!(tx.nonce, q(42));
    assert_eq!(tx.gas, q(21_000));

    let err = decode_transaction(&wire, DecodeMode::Strict).unwrap_err();
    assert_eq!(err.field(), Some("gasPrice"));
    assert!(matches!(err, DecodeError::Field { .. }));
}

#[test]
fn missing_fields_decode_to_zero_in_both_modes() {
    let wire = json!({ "hash": TX_HASH, "to": null });
    for mode in [DecodeMode::Lenient, DecodeMode::Strict] {
        let tx = decode_transaction(&wire, mode).unwrap();
        assert_eq!(tx.hash, hash(TX_HASH));
        assert_eq!(tx.to, Address::ZERO);
        assert_eq!(tx.block_hash, Hash::ZERO);
        assert_eq!(tx.input, Data::empty());
        assert_eq!(tx.gas, q(0));
        assert!(tx.v.is_empty());
    }
}

#[test]
fn malformed_address_is_reported_in_strict_mode() {
    let mut wire = wire_transaction();
    wire["from"] = json!("0xa7d9ddbe1f17865597fbd27ec712455208b6b76");

    let err = decode_transaction(&wire, DecodeMode::Strict).unwrap_err();
    assert_eq!(err.field(), Some("from"));

    let tx = decode_transaction(&wire, DecodeMode::Lenient).unwrap();
    assert_eq!(tx.from, Address::ZERO);
    assert_eq!(tx.to, TO.parse::<Address>().unwrap());
}

// ─── Blocks ───────────────────────────────────────────────────────────────────

#[test]
fn block_with_all_fields() {
    let block = decode_block(&wire_block(), DecodeMode::Strict).unwrap();

    assert_eq!(block.number, q(436));
    assert_eq!(block.difficulty, q(0x4ea3f27bc));
    assert_eq!(block.total_difficulty, q(0x78ed983323d));
    assert_eq!(block.gas_limit, q(5000));
    assert_eq!(block.gas_used, q(0));
    assert_eq!(block.size, q(544));
    assert_eq!(block.timestamp, q(1_438_271_100));
    assert_eq!(block.nonce.as_bytes().len(), 8);
    assert_eq!(block.logs_bloom.len(), 256);
    assert_eq!(block.extra_data.as_bytes(), b"Geth/LVIV/v1.0.0/linux/go1.4.2");
    assert_eq!(
        block.miner,
        "0xbb7b8287f3f0a933474a79eae42cbca977791171".parse::<Address>().unwrap()
    );
    assert_eq!(
        block.sha3_uncles,
        hash("0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347")
    );
    assert!(block.transactions.is_empty());
    assert!(block.uncles.is_empty());
}

#[test]
fn block_hash_lists_keep_order() {
    let a = format!("0x{}", "01".repeat(32));
    let b = format!("0x{}", "02".repeat(32));
    let mut wire = wire_block();
    wire["transactions"] = json!([a, b]);
    wire["uncles"] = json!([b]);

    let block = decode_block(&wire, DecodeMode::Strict).unwrap();
    assert_eq!(block.transactions, vec![hash(&a), hash(&b)]);
    assert_eq!(block.uncles, vec![hash(&b)]);
}

#[test]
fn block_serializes_back_to_wire_names() {
    let block = decode_block(&wire_block(), DecodeMode::Strict).unwrap();
    let json = serde_json::to_value(&block).unwrap();
    let wire = wire_block();
    for field in ["hash", "miner", "number", "difficulty", "totalDifficulty", "extraData", "nonce"] {
        assert_eq!(json[field], wire[field], "field {field}");
    }
}

// ─── Receipts and logs ────────────────────────────────────────────────────────

#[test]
fn receipt_with_nested_logs() {
    let wire = json!({
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "contractAddress": null,
        "cumulativeGasUsed": "0x33bc",
        "from": FROM,
        "gasUsed": "0x4dc",
        "logs": [wire_log(false), wire_log(true)],
        "logsBloom": "0x00",
        "status": "0x1",
        "to": TO,
        "transactionHash": TX_HASH,
        "transactionIndex": "0x41"
    });

    let receipt = decode_receipt(&wire, DecodeMode::Strict).unwrap();
    assert_eq!(receipt.status, q(1));
    assert_eq!(receipt.gas_used, q(1244));
    assert_eq!(receipt.cumulative_gas_used, q(13244));
    assert_eq!(receipt.contract_address, Address::ZERO);
    assert_eq!(receipt.logs.len(), 2);
    assert!(!receipt.logs[0].removed);
    assert!(receipt.logs[1].removed);
    assert_eq!(receipt.logs[0].topics.len(), 2);
    assert_eq!(receipt.logs[0].transaction_hash, hash(TX_HASH));
}

#[test]
fn receipt_propagates_strict_log_errors() {
    let mut bad = wire_log(false);
    bad["logIndex"] = json!("-1");
    let wire = json!({ "logs": [wire_log(false), bad] });

    let err = decode_receipt(&wire, DecodeMode::Strict).unwrap_err();
    assert_eq!(err.field(), Some("logIndex"));

    let receipt = decode_receipt(&wire, DecodeMode::Lenient).unwrap();
    assert_eq!(receipt.logs[1].log_index, q(0));
    assert_eq!(receipt.logs[1].block_number, q(6_139_707));
}

#[test]
fn removed_flag_is_preserved() {
    for removed in [true, false] {
        let log = decode_log(&wire_log(removed), DecodeMode::Strict).unwrap();
        assert_eq!(log.removed, removed);
    }
    let absent = decode_log(&json!({}), DecodeMode::Strict).unwrap();
    assert!(!absent.removed);
}

#[test]
fn log_topics_and_data() {
    let log = decode_log(&wire_log(false), DecodeMode::Strict).unwrap();
    assert_eq!(
        log.topics[0].to_hex(),
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
    );
    assert_eq!(log.data.len(), 32);
    assert_eq!(log.data.as_bytes()[30..], [0x03, 0xe8]);
}

#[test]
fn empty_topics_give_empty_vec() {
    let mut wire = wire_log(false);
    wire["topics"] = json!([]);
    let log = decode_log(&wire, DecodeMode::Strict).unwrap();
    assert!(log.topics.is_empty());
}

#[test]
fn legacy_txdata_spelling_is_accepted() {
    let log = decode_log(&json!({ "TxData": "0xbeef" }), DecodeMode::Strict).unwrap();
    assert_eq!(log.data.as_bytes(), &[0xbe, 0xef]);
}

#[test]
fn get_logs_result_array() {
    let logs = decode_logs(&json!([wire_log(false), wire_log(true)]), DecodeMode::Lenient).unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs[1].removed);

    let empty = decode_logs(&json!([]), DecodeMode::Strict).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn bare_numbers_wider_than_u64_decode_exactly() {
    let wire: Value = serde_json::from_str(
        r#"{"value": 100000000000000000000001, "gas": 18446744073709551616, "nonce": 7}"#,
    )
    .unwrap();

    for mode in [DecodeMode::Strict, DecodeMode::Lenient] {
        let tx = decode_transaction(&wire, mode).unwrap();
        assert_eq!(tx.gas, Quantity::from(u64::MAX) + 1u32);
        assert_eq!(
            tx.value,
            Quantity::parse_bytes(b"100000000000000000000001", 10).unwrap()
        );
        assert_eq!(tx.nonce, q(7));
    }
}

#[test]
fn huge_exponents_in_strings_are_zero_when_lenient() {
    let wire = json!({ "gas": "1e-9223372036854775808", "gasPrice": "1e4097", "nonce": "1e3" });

    let tx = decode_transaction(&wire, DecodeMode::Lenient).unwrap();
    assert_eq!(tx.gas, q(0));
    assert_eq!(tx.gas_price, q(0));
    assert_eq!(tx.nonce, q(1000));

    let err = decode_transaction(&wire, DecodeMode::Strict).unwrap_err();
    assert_eq!(err.field(), Some("gas"));
}
