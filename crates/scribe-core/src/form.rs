//! Post form: binds submitted fields, validates them, and describes the
//! form for the create/edit page.

use serde_json::{Value, json};

use scribe_types::form::{
    Choice, FieldKind, FormDescriptor, FormErrors, FormField, INVALID_CHOICE_MESSAGE,
    REQUIRED_MESSAGE,
};
use scribe_types::group::{Group, GroupId};
use scribe_types::post::{FieldMeta, GROUP_FIELD, Post, PostInput, TEXT_FIELD, ValidPost};

/// The user-editable part of a post: `text` and `group`.
pub struct PostForm;

/// A submitted body read field by field.
///
/// `rejected` holds values that could not even be read as their field's
/// type (a group that is not an id). They are reported alongside the
/// regular validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub input: PostInput,
    pub rejected: FormErrors,
}

impl From<PostInput> for Submission {
    fn from(input: PostInput) -> Self {
        Self {
            input,
            rejected: FormErrors::new(),
        }
    }
}

impl From<&PostInput> for Submission {
    fn from(input: &PostInput) -> Self {
        input.clone().into()
    }
}

impl PostForm {
    /// Validate submitted data against the known groups.
    ///
    /// Text is trimmed and must not be empty. A group, when given, must be
    /// one of `groups`.
    pub fn bind(input: &PostInput, groups: &[Group]) -> Result<ValidPost, FormErrors> {
        let mut errors = FormErrors::new();

        let text = input.text.trim();
        if text.is_empty() {
            errors.add(TEXT_FIELD.name, REQUIRED_MESSAGE);
        }

        if let Some(group_id) = input.group {
            if !groups.iter().any(|g| g.id == group_id) {
                errors.add(GROUP_FIELD.name, INVALID_CHOICE_MESSAGE);
            }
        }

        if errors.is_empty() {
            Ok(ValidPost {
                text: text.to_string(),
                group: input.group,
            })
        } else {
            Err(errors)
        }
    }

    /// Read a JSON body without failing on field types.
    ///
    /// `text` takes strings, numbers and booleans as text; anything else
    /// counts as missing. `group` takes an integer or a string holding one.
    /// Null, a missing key and `""` (the empty choice) mean no group.
    pub fn decode(body: &Value) -> Submission {
        let mut submission = Submission::default();

        submission.input.text = match body.get(TEXT_FIELD.name) {
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => String::new(),
        };

        let group = match body.get(GROUP_FIELD.name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or(()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| ()),
            Some(_) => Err(()),
        };
        match group {
            Ok(id) => submission.input.group = id.map(GroupId),
            Err(()) => submission
                .rejected
                .add(GROUP_FIELD.name, INVALID_CHOICE_MESSAGE),
        }

        submission
    }

    /// [`bind`](Self::bind) plus whatever [`decode`](Self::decode) rejected.
    pub fn bind_submission(
        submission: &Submission,
        groups: &[Group],
    ) -> Result<ValidPost, FormErrors> {
        let bound = Self::bind(&submission.input, groups);
        if submission.rejected.is_empty() {
            return bound;
        }
        let mut errors = submission.rejected.clone();
        if let Err(bind_errors) = bound {
            errors.merge(bind_errors);
        }
        Err(errors)
    }

    /// Describe an unbound form, pre-filled from `instance` when editing.
    pub fn describe(groups: &[Group], instance: Option<&Post>) -> FormDescriptor {
        let initial = instance
            .map(|post| PostInput {
                text: post.text.clone(),
                group: post.group.as_ref().map(|g| g.id),
            })
            .unwrap_or_default();
        Self::describe_bound(groups, &initial)
    }

    /// Describe a form carrying the submitted values (used to send an
    /// invalid submission back with its errors).
    pub fn describe_bound(groups: &[Group], data: &PostInput) -> FormDescriptor {
        let mut choices = vec![Choice {
            value: Value::Null,
            label: "---------".to_string(),
        }];
        choices.extend(groups.iter().map(|g| Choice {
            value: json!(g.id),
            label: g.title.clone(),
        }));

        FormDescriptor {
            fields: vec![
                field(TEXT_FIELD, FieldKind::Text, true, json!(data.text), Vec::new()),
                field(
                    GROUP_FIELD,
                    FieldKind::Choice,
                    false,
                    json!(data.group),
                    choices,
                ),
            ],
            errors: FormErrors::new(),
        }
    }
}

fn field(
    meta: FieldMeta,
    kind: FieldKind,
    required: bool,
    initial: Value,
    choices: Vec<Choice>,
) -> FormField {
    FormField {
        name: meta.name.to_string(),
        kind,
        label: meta.label.to_string(),
        help_text: meta.help_text.to_string(),
        required,
        initial,
        choices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scribe_types::post::{AuthorRef, GroupRef, PostId};
    use scribe_types::user::UserId;

    fn groups() -> Vec<Group> {
        vec![Group {
            id: GroupId(1),
            title: "Test group".to_string(),
            slug: "test-slug".to_string(),
            description: "Test description".to_string(),
        }]
    }

    #[test]
    fn test_bind_valid_without_group() {
        let input = PostInput {
            text: "  New post  ".to_string(),
            group: None,
        };
        let valid = PostForm::bind(&input, &groups()).unwrap();
        assert_eq!(valid.text, "New post");
        assert!(valid.group.is_none());
    }

    #[test]
    fn test_bind_valid_with_group() {
        let input = PostInput {
            text: "New post".to_string(),
            group: Some(GroupId(1)),
        };
        let valid = PostForm::bind(&input, &groups()).unwrap();
        assert_eq!(valid.group, Some(GroupId(1)));
    }

    #[test]
    fn test_bind_blank_text_is_required_error() {
        let input = PostInput {
            text: "   \n".to_string(),
            group: None,
        };
        let errors = PostForm::bind(&input, &groups()).unwrap_err();
        assert_eq!(errors.get("text").unwrap(), [REQUIRED_MESSAGE]);
        assert!(errors.get("group").is_none());
    }

    #[test]
    fn test_bind_unknown_group_is_invalid_choice() {
        let input = PostInput {
            text: "text".to_string(),
            group: Some(GroupId(99)),
        };
        let errors = PostForm::bind(&input, &groups()).unwrap_err();
        assert_eq!(errors.get("group").unwrap(), [INVALID_CHOICE_MESSAGE]);
    }

    #[test]
    fn test_decode_reads_ids_from_numbers_and_strings() {
        let sub = PostForm::decode(&json!({ "text": "hi", "group": 1 }));
        assert_eq!(sub.input.group, Some(GroupId(1)));
        assert!(sub.rejected.is_empty());

        let sub = PostForm::decode(&json!({ "text": "hi", "group": " 1 " }));
        assert_eq!(sub.input.group, Some(GroupId(1)));

        for empty in [
            json!({ "text": "hi" }),
            json!({ "text": "hi", "group": null }),
            json!({ "text": "hi", "group": "" }),
        ] {
            let sub = PostForm::decode(&empty);
            assert_eq!(sub.input.group, None);
            assert!(sub.rejected.is_empty());
        }
    }

    #[test]
    fn test_decode_rejects_group_that_is_not_an_id() {
        for bad in [json!("abc"), json!(1.5), json!([1]), json!({ "id": 1 })] {
            let sub = PostForm::decode(&json!({ "text": "hi", "group": bad }));
            assert_eq!(sub.input.group, None);
            assert_eq!(sub.rejected.get("group").unwrap(), [INVALID_CHOICE_MESSAGE]);
        }
    }

    #[test]
    fn test_decode_text_null_is_required() {
        let sub = PostForm::decode(&json!({ "text": null }));
        assert_eq!(sub.input.text, "");
        let errors = PostForm::bind_submission(&sub, &groups()).unwrap_err();
        assert_eq!(errors.get("text").unwrap(), [REQUIRED_MESSAGE]);

        let sub = PostForm::decode(&json!({ "text": 42 }));
        assert_eq!(sub.input.text, "42");
    }

    #[test]
    fn test_bind_submission_reports_every_field() {
        let sub = PostForm::decode(&json!({ "text": "  ", "group": "abc" }));
        let errors = PostForm::bind_submission(&sub, &groups()).unwrap_err();
        assert_eq!(errors.get("text").unwrap(), [REQUIRED_MESSAGE]);
        assert_eq!(errors.get("group").unwrap(), [INVALID_CHOICE_MESSAGE]);

        let sub = PostForm::decode(&json!({ "text": "fine", "group": "1" }));
        let valid = PostForm::bind_submission(&sub, &groups()).unwrap();
        assert_eq!(valid.group, Some(GroupId(1)));
    }

    #[test]
    fn test_describe_has_text_and_choice_fields() {
        let form = PostForm::describe(&groups(), None);
        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["text", "group"]);

        let text = form.field("text").unwrap();
        assert_eq!(text.kind, FieldKind::Text);
        assert!(text.required);
        assert_eq!(text.initial, json!(""));

        let group = form.field("group").unwrap();
        assert_eq!(group.kind, FieldKind::Choice);
        assert!(!group.required);
        assert_eq!(group.choices.len(), 2);
        assert_eq!(group.choices[1].label, "Test group");
        assert_eq!(group.initial, Value::Null);
    }

    #[test]
    fn test_describe_prefills_from_instance() {
        let post = Post {
            id: PostId(1),
            text: "Existing".to_string(),
            pub_date: Utc::now(),
            author: AuthorRef {
                id: UserId::new(),
                username: "auth".to_string(),
            },
            group: Some(GroupRef {
                id: GroupId(1),
                title: "Test group".to_string(),
                slug: "test-slug".to_string(),
            }),
        };
        let form = PostForm::describe(&groups(), Some(&post));
        assert_eq!(form.field("text").unwrap().initial, json!("Existing"));
        assert_eq!(form.field("group").unwrap().initial, json!(1));
    }
}
