//! `mdprop new` command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the new command.
#[derive(Args)]
pub(crate) struct NewArgs {
    /// Path of the proposal document to create.
    path: PathBuf,

    /// Project name used in the title.
    #[arg(short, long, default_value = "New Project")]
    name: String,

    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

impl NewArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.path.exists() && !self.force {
            return Err(CliError::Validation(format!(
                "{} already exists (use --force to overwrite)",
                self.path.display()
            )));
        }

        let skeleton = PROPOSAL_SKELETON.replace("{{PROJECT_NAME}}", &self.name);
        std::fs::write(&self.path, skeleton)?;

        output.success(&format!("Proposal skeleton written: {}", self.path.display()));
        output.info("Fill in the placeholders, then run 'mdprop validate' and 'mdprop convert'");
        Ok(())
    }
}

/// Skeleton with the required outline, metadata lines, and tagged example
/// diagram blocks. `{{COMPANY_NAME}}` is left for the author to fill in;
/// `mdprop validate` reminds them until it is replaced.
const PROPOSAL_SKELETON: &str = r#"# {{PROJECT_NAME}} Proposal

**Prepared by:** {{COMPANY_NAME}}
**Date:** [month year]
**Version:** 1.0

---

## 1. Background & Objectives

### 1.1 Current Situation

[Describe the current situation and its problems in plain paragraphs.]

### 1.2 Customer Feedback

> "Quote real customer feedback here."

### 1.3 Proposed Approach

```ascii:flowchart
[Sketch the approach as an ASCII flowchart]
```

### 1.4 Objectives

| Category | Objective | Expected Outcome |
|----------|-----------|------------------|
| [cat]    | [goal]    | [outcome]        |

---

## 2. Solution Design

### 2.1 System Positioning

[What the system is, and what it deliberately is not.]

### 2.2 System Overview

```ascii:architecture
[Sketch the system structure as ASCII boxes]
```

### 2.3 Feature Design

| Module | Description | Value |
|--------|-------------|-------|
| [name] | [what]      | [why] |

---

## 3. Investment Budget

| Item | Amount |
|------|--------|
| [item] | $[amount] |
| **Total** | **$[total]** |

---

## 4. Implementation Timeline

Planned delivery in [N] weeks.

```ascii:timeline
Week 1-2 ━━ Week 3-4 ━━ Week 5-6
[design]    [build]     [rollout]
```
"#;
