#[derive(calmform::form::FormSchema)]
#[allow(dead_code)]
struct Profile {
    #[form(skip)]
    nickname: String,
}

fn main() {}
