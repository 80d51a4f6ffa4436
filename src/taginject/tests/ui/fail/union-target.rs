use taginject::Inject;

#[derive(Inject)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
