use taginject::Inject;

#[derive(Inject)]
enum Shape {
    Circle,
    Square,
}

fn main() {}
