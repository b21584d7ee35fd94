// Grammar node kinds used by the walker.
pub const COMMENT: &str = "comment";
pub const HTML_COMMENT: &str = "html_comment";

pub const FUNCTION_DECLARATION: &str = "function_declaration";
pub const GENERATOR_FUNCTION_DECLARATION: &str = "generator_function_declaration";
pub const CLASS_DECLARATION: &str = "class_declaration";
pub const METHOD_DEFINITION: &str = "method_definition";
pub const VARIABLE_DECLARATOR: &str = "variable_declarator";
pub const ASSIGNMENT_EXPRESSION: &str = "assignment_expression";
pub const PAIR: &str = "pair";

pub const FUNCTION_EXPRESSION: &str = "function_expression";
pub const GENERATOR_FUNCTION: &str = "generator_function";
pub const ARROW_FUNCTION: &str = "arrow_function";

pub const CALL_EXPRESSION: &str = "call_expression";
pub const MEMBER_EXPRESSION: &str = "member_expression";
pub const THIS: &str = "this";

pub const IDENTIFIER: &str = "identifier";
pub const PROPERTY_IDENTIFIER: &str = "property_identifier";
pub const ASSIGNMENT_PATTERN: &str = "assignment_pattern";
pub const REST_PATTERN: &str = "rest_pattern";

/// Nodes whose whole extent is one token.
pub const ATOMIC_TOKENS: &[&str] = &["string", "regex", "number"];

// Field names
pub const FIELD_NAME: &str = "name";
pub const FIELD_BODY: &str = "body";
pub const FIELD_PARAMETERS: &str = "parameters";
pub const FIELD_PARAMETER: &str = "parameter";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_LEFT: &str = "left";
pub const FIELD_RIGHT: &str = "right";
pub const FIELD_KEY: &str = "key";
pub const FIELD_FUNCTION: &str = "function";
pub const FIELD_OBJECT: &str = "object";
pub const FIELD_PROPERTY: &str = "property";
