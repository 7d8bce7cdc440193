//! # Request Module Unit Tests / Request 模块单元测试
//!
//! Tests for `ExecutionRequest` and `CommandSpec`: validation, tokenization
//! of the two command forms, and the wire format.
//!
//! 测试 `ExecutionRequest` 和 `CommandSpec`：验证、两种命令形式的拆分以及外部格式。

use container_command::{CommandSpec, ExecutionRequest, RequestError};

#[cfg(test)]
mod command_spec_tests {
    use super::*;

    #[test]
    fn test_line_splits_on_whitespace_runs() {
        let cmd = CommandSpec::from("echo   a\tb\n c");
        assert_eq!(cmd.tokens(), vec!["echo", "a", "b", "c"]);
    }

    #[test]
    fn test_argv_passes_tokens_through() {
        let cmd = CommandSpec::Argv(vec!["echo".to_string(), "a b".to_string()]);
        assert_eq!(cmd.tokens(), vec!["echo", "a b"]);
    }

    #[test]
    fn test_line_and_argv_differ_for_embedded_spaces() {
        let line = CommandSpec::from("echo 'a b'");
        let argv = CommandSpec::Argv(vec!["echo".to_string(), "a b".to_string()]);
        // The string form cannot express quoting: the quotes stay in the tokens.
        assert_eq!(line.tokens(), vec!["echo", "'a", "b'"]);
        assert_ne!(line.tokens(), argv.tokens());
    }

    #[test]
    fn test_emptiness() {
        assert!(CommandSpec::from("   ").is_empty());
        assert!(CommandSpec::Argv(vec![]).is_empty());
        assert!(!CommandSpec::from("ls").is_empty());
        // An argv holding an empty string is still one argument.
        assert!(!CommandSpec::Argv(vec![String::new()]).is_empty());
    }

    #[test]
    fn test_display_quotes_argv() {
        let argv = CommandSpec::Argv(vec!["echo".to_string(), "a b".to_string()]);
        assert_eq!(argv.to_string(), "echo 'a b'");
        assert_eq!(CommandSpec::from("ls -la").to_string(), "ls -la");
    }
}

#[cfg(test)]
mod request_tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_target() {
        assert_eq!(
            ExecutionRequest::new("", "ls").unwrap_err(),
            RequestError::EmptyTarget
        );
        assert_eq!(
            ExecutionRequest::new("  ", "ls").unwrap_err(),
            RequestError::EmptyTarget
        );
    }

    #[test]
    fn test_new_rejects_empty_command() {
        assert_eq!(
            ExecutionRequest::new("web", " ").unwrap_err(),
            RequestError::EmptyCommand
        );
        assert_eq!(
            ExecutionRequest::new("web", Vec::<String>::new()).unwrap_err(),
            RequestError::EmptyCommand
        );
    }

    #[test]
    fn test_modifiers_default_to_absent() {
        let request = ExecutionRequest::new("web", "ls").unwrap();
        assert_eq!(request.target(), "web");
        assert_eq!(request.working_directory(), None);
        assert_eq!(request.run_as_user(), None);
    }

    #[test]
    fn test_empty_modifiers_are_treated_as_absent() {
        let request = ExecutionRequest::new("web", "ls")
            .unwrap()
            .with_user("")
            .with_working_directory("");
        assert_eq!(request.run_as_user(), None);
        assert_eq!(request.working_directory(), None);
    }

    #[test]
    fn test_modifiers_are_kept() {
        let request = ExecutionRequest::new("web", "ls")
            .unwrap()
            .with_user("alice")
            .with_working_directory("/srv/app");
        assert_eq!(request.run_as_user(), Some("alice"));
        assert_eq!(request.working_directory(), Some("/srv/app"));
    }
}

#[cfg(test)]
mod wire_format_tests {
    use super::*;

    #[test]
    fn test_deserialize_string_command() {
        let request: ExecutionRequest = serde_json::from_str(
            r#"{"container": "myshop-test", "command": "composer install --no-dev", "chdir": "/var/www/myshop/current"}"#,
        )
        .unwrap();
        assert_eq!(request.target(), "myshop-test");
        assert_eq!(
            request.command(),
            &CommandSpec::Line("composer install --no-dev".to_string())
        );
        assert_eq!(request.working_directory(), Some("/var/www/myshop/current"));
        assert_eq!(request.run_as_user(), None);
    }

    #[test]
    fn test_deserialize_list_command() {
        let request: ExecutionRequest = serde_json::from_str(
            r#"{"container": "web", "command": ["sh", "-c", "echo a b"], "user": "www-data"}"#,
        )
        .unwrap();
        assert_eq!(request.command().tokens(), vec!["sh", "-c", "echo a b"]);
        assert_eq!(request.run_as_user(), Some("www-data"));
    }

    #[test]
    fn test_deserialize_null_and_empty_modifiers() {
        let request: ExecutionRequest = serde_json::from_str(
            r#"{"container": "web", "command": "ls", "chdir": null, "user": ""}"#,
        )
        .unwrap();
        assert_eq!(request.working_directory(), None);
        assert_eq!(request.run_as_user(), None);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<ExecutionRequest>(r#"{"container": "", "command": "ls"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("container name must not be empty"));

        let err = serde_json::from_str::<ExecutionRequest>(r#"{"container": "web", "command": []}"#)
            .unwrap_err();
        assert!(err.to_string().contains("command must not be empty"));
    }

    #[test]
    fn test_deserialize_requires_container_and_command() {
        assert!(serde_json::from_str::<ExecutionRequest>(r#"{"command": "ls"}"#).is_err());
        assert!(serde_json::from_str::<ExecutionRequest>(r#"{"container": "web"}"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_misspelled_modifiers() {
        let err = serde_json::from_str::<ExecutionRequest>(
            r#"{"container": "web", "command": "id", "usr": "root"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("usr"));

        let err = serde_json::from_str::<ExecutionRequest>(
            r#"{"container": "web", "command": "pwd", "chidr": "/x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("chidr"));
    }

    #[test]
    fn test_serialize_uses_caller_field_names() {
        let request = ExecutionRequest::new("web", "ls -la")
            .unwrap()
            .with_user("alice");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["container"], "web");
        assert_eq!(value["command"], "ls -la");
        assert_eq!(value["user"], "alice");
        assert!(value.get("chdir").is_none());
    }
}
