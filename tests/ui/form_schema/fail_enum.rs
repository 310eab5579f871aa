#[derive(calmform::form::FormSchema)]
#[allow(dead_code)]
enum Theme {
    Light,
    Dark,
}

fn main() {}
