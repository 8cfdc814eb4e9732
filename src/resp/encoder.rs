use crate::error::CommandError;

pub fn encode_simple_string(s: &str) -> Vec<u8> {
    format!("+{}\r\n", s).into_bytes()
}

pub fn encode_error(err: &CommandError) -> Vec<u8> {
    format!("-{} {}\r\n", err.code(), err).into_bytes()
}

pub fn encode_bulk_string(s: &str) -> Vec<u8> {
    format!("${}\r\n{}\r\n", s.len(), s).into_bytes()
}

pub fn encode_null_string() -> Vec<u8> {
    "$-1\r\n".as_bytes().to_vec()
}

pub fn encode_null_array() -> Vec<u8> {
    "*-1\r\n".as_bytes().to_vec()
}

pub fn encode_integer(n: i64) -> Vec<u8> {
    format!(":{}\r\n", n).into_bytes()
}

/// Encodes a flat array of bulk strings, e.g. LRANGE's reply.
pub fn encode_array(arr: &[String]) -> Vec<u8> {
    let mut bytes = format!("*{}\r\n", arr.len()).into_bytes();
    for s in arr {
        bytes.extend(encode_bulk_string(s));
    }
    bytes
}

/// Encodes an array whose elements are already-encoded RESP frames,
/// allowing nested arrays (XRANGE's reply shape).
pub fn encode_raw_array(parts: Vec<Vec<u8>>) -> Vec<u8> {
    let mut response = format!("*{}\r\n", parts.len()).into_bytes();
    for part in parts {
        response.extend(part);
    }
    response
}

/// Encodes one stream entry as `[id, [field, value, field, value, ...]]`.
pub fn encode_stream_entry(id: &str, fields: &[(String, String)]) -> Vec<u8> {
    let mut fields_resp = Vec::with_capacity(fields.len() * 2);
    for (k, v) in fields {
        fields_resp.push(encode_bulk_string(k));
        fields_resp.push(encode_bulk_string(v));
    }
    let encoded_fields = encode_raw_array(fields_resp);
    encode_raw_array(vec![encode_bulk_string(id), encoded_fields])
}
