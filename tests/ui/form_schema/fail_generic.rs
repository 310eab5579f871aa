#[derive(calmform::form::FormSchema)]
#[allow(dead_code)]
struct Draft<T> {
    value: T,
}

fn main() {}
