use serde::{Deserialize, Serialize};

use cellbot_extract::extract_operation;
use cellbot_ops::Operation;

use crate::error::{AssistError, AssistResult};

/// A parsed assistant reply: the prose plus any operation it carried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
}

/// Parse raw assistant text into a reply
///
/// Runs the operation extractor over the text; a reply without an
/// operation is still a valid reply. Only blank text is an error.
pub fn parse_reply(text: &str) -> AssistResult<AssistantReply> {
    if text.trim().is_empty() {
        return Err(AssistError::Empty);
    }

    let operation = extract_operation(text);
    match &operation {
        Some(op) => log::debug!("reply carries a {} operation", op.kind()),
        None => log::debug!("reply carries no operation"),
    }

    Ok(AssistantReply {
        text: text.to_string(),
        operation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellbot_core::Scalar;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reply_with_operation() {
        let text = "Updating now.\n\
                    EXCEL_OPERATION_START\n\
                    {\"type\": \"update_cell\", \"data\": {\"row\": 0, \"col\": 0, \"value\": \"Hi\"}}\n\
                    EXCEL_OPERATION_END";

        let reply = parse_reply(text).unwrap();
        assert_eq!(reply.text, text);
        assert_eq!(
            reply.operation,
            Some(Operation::UpdateCell {
                row: 0,
                col: 0,
                value: Scalar::text("Hi"),
            })
        );
    }

    #[test]
    fn test_reply_without_operation() {
        let reply = parse_reply("Your sheet already looks correct.").unwrap();
        assert_eq!(reply.operation, None);
    }

    #[test]
    fn test_blank_reply_is_an_error() {
        assert_eq!(parse_reply("   \n  "), Err(AssistError::Empty));
    }
}
