use laundrylobby_frontend::App;
use leptos::prelude::*;

// 单线程 WASM 环境下使用更小的分配器以压缩二进制体积
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: lol_alloc::AssumeSingleThreaded<lol_alloc::FreeListAllocator> =
    unsafe { lol_alloc::AssumeSingleThreaded::new(lol_alloc::FreeListAllocator::new()) };

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
