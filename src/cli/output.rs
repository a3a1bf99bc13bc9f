//! Tree rendering for decoded BER.
//!
//! The tree is built from the wire bytes so every node reports the offset
//! and length it actually had; leaf values are rendered through the typed
//! decoder.

use std::io::{self, Write};

use bytes::Bytes;
use serde::Serialize;

use crate::ber::{Decoder, Tlv};
use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::format::hex;
use crate::message::CommunityMessage;
use crate::value::SnmpObject;

/// One TLV in the rendered tree.
#[derive(Debug, Serialize)]
pub struct Node {
    /// Offset of the tag byte.
    pub offset: usize,
    /// Registered type name.
    #[serde(rename = "type")]
    pub type_name: &'static str,
    /// Wire tag byte as two hex digits.
    pub tag: String,
    /// Content length.
    pub length: usize,
    /// Display string of a primitive value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Raw content of a primitive value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_hex: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// Summary of a community message.
#[derive(Debug, Serialize)]
pub struct MessageSummary {
    pub version: String,
    pub community: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    pub pdu: String,
}

impl From<&CommunityMessage> for MessageSummary {
    fn from(msg: &CommunityMessage) -> Self {
        Self {
            version: msg.version.to_string(),
            community: msg.community.to_string(),
            request_id: msg.request_id(),
            pdu: msg.pdu().tag().name().to_string(),
        }
    }
}

/// Full decoder output.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageSummary>,
    pub tree: Node,
}

impl Report {
    /// Decode `data` as one value (or one community message) and build its tree.
    ///
    /// The typed decode runs first, so any structural error is reported
    /// before anything is rendered.
    pub fn build(data: Bytes, as_message: bool) -> Result<Self> {
        let message = if as_message {
            Some(MessageSummary::from(&CommunityMessage::decode(data.clone())?))
        } else {
            SnmpObject::decode_bytes(data.clone())?;
            None
        };

        let mut decoder = Decoder::new(data);
        let tree = build_node(&mut decoder)?;
        Ok(Self { message, tree })
    }

    /// Write the report to stdout.
    pub fn write(&self, format: OutputFormat) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match format {
            OutputFormat::Text => self.write_text(&mut stdout),
            OutputFormat::Json => self.write_json(&mut stdout),
        }
    }

    pub fn write_text<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if let Some(msg) = &self.message {
            write!(w, "{} community={:?}", msg.version, msg.community)?;
            if let Some(id) = msg.request_id {
                write!(w, " request-id={}", id)?;
            }
            writeln!(w)?;
        }
        write_node(w, &self.tree, 0)
    }

    pub fn write_json<W: Write>(&self, w: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)
    }
}

fn build_node(decoder: &mut Decoder) -> Result<Node> {
    let offset = decoder.offset();
    let tlv = decoder.read_tlv()?;
    let mut node = Node {
        offset,
        type_name: tlv.tag.name(),
        tag: format!("{:02X}", tlv.tag.byte()),
        length: tlv.length,
        value: None,
        raw_hex: None,
        children: Vec::new(),
    };

    if tlv.tag.is_constructed() {
        let mut inner = decoder.enter(&tlv)?;
        while !inner.is_empty() {
            node.children.push(build_node(&mut inner)?);
        }
    } else {
        node.raw_hex = Some(hex::encode(&tlv.value));
        node.value = Some(leaf_value(tlv)?);
    }
    Ok(node)
}

fn leaf_value(tlv: Tlv) -> Result<String> {
    Ok(SnmpObject::from_tlv(tlv)?.to_display_string())
}

fn write_node<W: Write>(w: &mut W, node: &Node, indent: usize) -> io::Result<()> {
    write!(
        w,
        "{:indent$}[{}] {} (0x{}) len={}",
        "",
        node.offset,
        node.type_name,
        node.tag,
        node.length,
        indent = indent * 2
    )?;
    if let Some(value) = &node.value {
        write!(w, ": {}", value)?;
    }
    writeln!(w)?;
    for child in &node.children {
        write_node(w, child, indent + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::pdu::Pdu;

    fn render(report: &Report) -> String {
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_tree() {
        let data = Bytes::from_static(&[0x30, 0x06, 0x02, 0x01, 0x05, 0x04, 0x01, b'a']);
        let report = Report::build(data, false).unwrap();
        assert_eq!(
            render(&report),
            "[0] SEQUENCE (0x30) len=6\n  [2] INTEGER (0x02) len=1: 5\n  [5] OCTET STRING (0x04) len=1: a\n"
        );
    }

    #[test]
    fn test_message_report_json() {
        let msg = CommunityMessage::v2c("public", Pdu::get_request(3, &[oid!(1, 3, 6, 1)]));
        let report = Report::build(msg.encode().unwrap(), true).unwrap();

        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["message"]["request_id"], 3);
        assert_eq!(json["message"]["community"], "public");
        assert_eq!(json["tree"]["children"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_input_reports_error() {
        let data = Bytes::from_static(&[0x30, 0x03, 0x02, 0x01]);
        assert!(Report::build(data, false).is_err());
    }
}
