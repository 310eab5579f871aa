use calmform::form::{FormConfig, FormSchema, FormState, mount};

#[derive(calmform::form::FormSchema)]
#[allow(dead_code)]
struct SignInForm {
    email: String,
    #[form(rename = "pass")]
    password: String,
}

fn main() {
    let fields = SignInForm::fields();
    assert_eq!(fields.email().as_str(), "email");
    assert_eq!(fields.password().as_str(), "pass");
    assert_eq!(SignInForm::field_names(), &["email", "pass"]);

    let config = FormConfig::<String>::default();
    let state = mount(&FormState::default(), fields.email(), String::new(), &config);
    assert!(state.is_mounted(fields.email()));
}
