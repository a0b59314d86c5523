use buddypit::{Arena, ArenaConfig};

// prints "hello world" from a string built inside the arena
fn main() {
    let mut arena = Arena::new(ArenaConfig::default()).expect("default config is valid");
    let world = arena
        .alloc(6)
        .expect("arena reserved")
        .expect("arena has room");

    let bytes = unsafe { std::slice::from_raw_parts_mut(world.as_ptr(), 5) };
    bytes.copy_from_slice(b"world");

    println!("hello {}", String::from_utf8_lossy(bytes));
    print!("{}", arena);

    arena.free(world).expect("pointer came from this arena");
}
