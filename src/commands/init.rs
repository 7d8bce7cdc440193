//! # Task File Initialization Module / 任务文件初始化模块
//!
//! This module writes a starter `Tasks.toml`, either from a fixed template or
//! through a short interactive wizard that asks for the container, the
//! command, and the optional working directory and user.
//!
//! 此模块生成初始的 `Tasks.toml`，可以使用固定模板，
//! 也可以通过简短的交互式向导询问容器、命令以及可选的工作目录和用户。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{RunnerConfig, Task, TaskFile};
use crate::core::request::ExecutionRequest;
use crate::infra::t;

/// Runs the wizard (or writes the template when `non_interactive`) and
/// saves the result to `config_path`.
///
/// 运行向导（`non_interactive` 时直接写入模板）并保存到 `config_path`。
pub fn run_init_wizard(config_path: &Path, language: &str, non_interactive: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
        println!("{}", t!("init.description", locale = language));
    }

    if config_path.exists() {
        if non_interactive {
            anyhow::bail!(
                t!(
                    "init.already_exists",
                    locale = language,
                    path = config_path.display()
                )
                .to_string()
            );
        }
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init.overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let task_file = if non_interactive {
        default_task_file(language)?
    } else {
        prompt_task_file(&theme, language)?
    };

    write_task_file(config_path, &task_file, language)
}

/// The template written by `init --non-interactive`.
/// `init --non-interactive` 写入的模板。
pub fn default_task_file(language: &str) -> Result<TaskFile> {
    let install = ExecutionRequest::new("myshop-test", "composer install --no-dev")?
        .with_working_directory("/var/www/myshop/current");
    let migrate = ExecutionRequest::new(
        "myshop-test",
        "php bin/console doctrine:migrations:migrate --no-interaction",
    )?
    .with_working_directory("/var/www/myshop/current");

    Ok(TaskFile {
        language: language.to_string(),
        runner: RunnerConfig::default(),
        tasks: vec![
            Task {
                name: "install-dependencies".to_string(),
                request: install,
                ignore_errors: false,
            },
            Task {
                name: "run-migrations".to_string(),
                request: migrate,
                ignore_errors: false,
            },
        ],
    })
}

fn prompt_task_file(theme: &ColorfulTheme, language: &str) -> Result<TaskFile> {
    let container: String = Input::with_theme(theme)
        .with_prompt(t!("init.container_prompt", locale = language))
        .interact_text()?;
    let command: String = Input::with_theme(theme)
        .with_prompt(t!("init.command_prompt", locale = language))
        .interact_text()?;
    let chdir: String = Input::with_theme(theme)
        .with_prompt(t!("init.chdir_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;
    let user: String = Input::with_theme(theme)
        .with_prompt(t!("init.user_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;
    let timeout_secs: u64 = Input::with_theme(theme)
        .with_prompt(t!("init.timeout_prompt", locale = language))
        .default(RunnerConfig::default().timeout_secs)
        .interact_text()?;

    let request = ExecutionRequest::new(container, command)?
        .with_working_directory(chdir)
        .with_user(user);

    let runner = RunnerConfig {
        timeout_secs,
        ..RunnerConfig::default()
    };
    let task_file = TaskFile {
        language: language.to_string(),
        runner,
        tasks: vec![Task {
            name: "first-task".to_string(),
            request,
            ignore_errors: false,
        }],
    };
    task_file.validate()?;
    Ok(task_file)
}

fn write_task_file(path: &Path, task_file: &TaskFile, language: &str) -> Result<()> {
    let content = toml::to_string_pretty(task_file)
        .context(t!("init.serialize_failed", locale = language).to_string())?;
    fs::write(path, content)
        .with_context(|| {
            t!("init.write_failed", locale = language, path = path.display()).to_string()
        })?;
    println!(
        "\n{}",
        t!("init.success", locale = language, path = path.display()).green()
    );
    Ok(())
}
