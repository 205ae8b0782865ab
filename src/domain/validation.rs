use std::ops::RangeInclusive;

use thiserror::Error;

use super::idea::IdeaDraft;

pub(crate) const TITLE_LEN: RangeInclusive<usize> = 2..=10;
pub(crate) const DESCRIPTION_LEN: RangeInclusive<usize> = 5..=50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("请输入创意标题")]
    TitleMissing,
    #[error("标题长度需在 2-10 个字符之间")]
    TitleLength,
    #[error("请输入创意描述")]
    DescriptionMissing,
    #[error("描述长度需在 5-50 个字符之间")]
    DescriptionLength,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FormErrors {
    pub(crate) title: Option<ValidationError>,
    pub(crate) description: Option<ValidationError>,
}

impl FormErrors {
    pub(crate) fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        [self.title, self.description]
            .into_iter()
            .flatten()
            .map(|err| err.to_string())
            .collect()
    }
}

pub(crate) fn validate(title: &str, description: &str) -> Result<IdeaDraft, FormErrors> {
    let title = title.trim();
    let description = description.trim();
    let errors = FormErrors {
        title: check_title(title),
        description: check_description(description),
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(IdeaDraft {
        title: title.to_string(),
        description: description.to_string(),
    })
}

fn check_title(title: &str) -> Option<ValidationError> {
    if title.is_empty() {
        Some(ValidationError::TitleMissing)
    } else if !TITLE_LEN.contains(&title.chars().count()) {
        Some(ValidationError::TitleLength)
    } else {
        None
    }
}

fn check_description(description: &str) -> Option<ValidationError> {
    if description.is_empty() {
        Some(ValidationError::DescriptionMissing)
    } else if !DESCRIPTION_LEN.contains(&description.chars().count()) {
        Some(ValidationError::DescriptionLength)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_report_both_missing() {
        let errors = validate("", "   ").unwrap_err();
        assert_eq!(errors.title, Some(ValidationError::TitleMissing));
        assert_eq!(errors.description, Some(ValidationError::DescriptionMissing));
        assert_eq!(errors.messages(), vec!["请输入创意标题", "请输入创意描述"]);
    }

    #[test]
    fn title_bounds_are_inclusive() {
        assert!(validate("ab", "hello").is_ok());
        assert!(validate("abcdefghij", "hello").is_ok());
        assert_eq!(
            validate("a", "hello").unwrap_err().title,
            Some(ValidationError::TitleLength)
        );
        assert_eq!(
            validate("abcdefghijk", "hello").unwrap_err().title,
            Some(ValidationError::TitleLength)
        );
    }

    #[test]
    fn description_length_is_checked_on_description() {
        let long = "描".repeat(51);
        let errors = validate("测试", &long).unwrap_err();
        assert_eq!(errors.title, None);
        assert_eq!(errors.description, Some(ValidationError::DescriptionLength));

        assert!(validate("测试", &"描".repeat(50)).is_ok());
        assert_eq!(
            validate("测试", "四个字符").unwrap_err().description,
            Some(ValidationError::DescriptionLength)
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let draft = validate("测试创意标题", "这是一个测试创意的详细描述").unwrap();
        assert_eq!(draft.title, "测试创意标题");
    }

    #[test]
    fn trims_before_measuring_and_storing() {
        let draft = validate("  ab  ", "\thello world\n").unwrap();
        assert_eq!(draft.title, "ab");
        assert_eq!(draft.description, "hello world");
        assert_eq!(
            validate(" a ", "hello").unwrap_err().title,
            Some(ValidationError::TitleLength)
        );
    }
}
