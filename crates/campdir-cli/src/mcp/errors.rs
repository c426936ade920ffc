//! Mapping of directory errors onto MCP error codes.

use campdir_core::DirectoryError;
use rmcp::ErrorData;

/// Caller mistakes become `invalid_params`; everything else is internal.
pub fn to_mcp_error(message: &str, error: &DirectoryError) -> ErrorData {
    let message = format!("{message}: {error}");
    if error.is_client_error() {
        ErrorData::invalid_params(message, None)
    } else {
        ErrorData::internal_error(message, None)
    }
}
