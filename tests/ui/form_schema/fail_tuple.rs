#[derive(calmform::form::FormSchema)]
#[allow(dead_code)]
struct Credentials(String, String);

fn main() {}
